use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use campus_core::ListParams;

use crate::modules::admins::model::{Admin, CreateAdminDto, RemoveAdminDto, UpdateAdminDto};
use crate::modules::courses::model::{Course, CreateCourseDto, UpdateCourseDto};
use crate::modules::divisions::model::{
    BulkEnrolmentResponse, CreateDivisionDto, Division, DivisionStudent, StudentDivision,
    UpdateDivisionDto,
};
use crate::modules::files::model::{CourseFile, UpdateFileDto};
use crate::modules::lectures::model::{CreateLectureDto, Lecture, UpdateLectureDto, Weekday};
use crate::modules::login::model::{
    LoginForm, MessageResponse, ResetPasswordRequest, TokenResponse,
};
use crate::modules::professors::model::{Professor, UpdateProfessorDto};
use crate::modules::schools::model::{CreateSchoolDto, School, UpdateSchoolDto};
use crate::modules::students::model::{Student, UpdateStudentDto};
use crate::modules::terms::model::{CreateTermDto, Term, UpdateTermDto};
use crate::modules::timeslots::model::{CreateTimeslotDto, Timeslot, UpdateTimeslotDto};
use crate::modules::users::model::{CreateUserDto, UpdateMeDto, UpdateUserDto, User, UserType};
use crate::modules::years::model::{CreateYearDto, UpdateYearDto, Year};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::login::controller::login_access_token,
        crate::modules::login::controller::login_refresh_token,
        crate::modules::login::controller::test_token,
        crate::modules::login::controller::recover_password,
        crate::modules::login::controller::reset_password,
        crate::modules::users::controller::list_users,
        crate::modules::users::controller::create_user,
        crate::modules::users::controller::get_me,
        crate::modules::users::controller::update_me,
        crate::modules::users::controller::get_user_by_id,
        crate::modules::users::controller::update_user,
        crate::modules::users::controller::update_profile_picture,
        crate::modules::admins::controller::get_current_admin,
        crate::modules::admins::controller::promote_admin,
        crate::modules::admins::controller::update_admin,
        crate::modules::admins::controller::demote_admin,
        crate::modules::utils::controller::send_test_email,
        crate::modules::schools::controller::list_schools,
        crate::modules::schools::controller::create_school,
        crate::modules::schools::controller::get_school,
        crate::modules::schools::controller::update_school,
        crate::modules::schools::controller::delete_school,
        crate::modules::schools::controller::list_school_students,
        crate::modules::schools::controller::list_school_professors,
        crate::modules::years::controller::list_years,
        crate::modules::years::controller::get_year,
        crate::modules::years::controller::create_year,
        crate::modules::years::controller::update_year,
        crate::modules::years::controller::delete_year,
        crate::modules::terms::controller::list_terms,
        crate::modules::terms::controller::get_term,
        crate::modules::terms::controller::create_term,
        crate::modules::terms::controller::update_term,
        crate::modules::terms::controller::delete_term,
        crate::modules::courses::controller::list_courses,
        crate::modules::courses::controller::get_course,
        crate::modules::courses::controller::create_course,
        crate::modules::courses::controller::update_course,
        crate::modules::courses::controller::delete_course,
        crate::modules::divisions::controller::list_divisions,
        crate::modules::divisions::controller::get_division,
        crate::modules::divisions::controller::create_division,
        crate::modules::divisions::controller::update_division,
        crate::modules::divisions::controller::delete_division,
        crate::modules::divisions::controller::list_division_students,
        crate::modules::divisions::controller::list_batch_students,
        crate::modules::divisions::controller::enrol_students,
        crate::modules::divisions::controller::remove_student,
        crate::modules::professors::controller::list_professors,
        crate::modules::professors::controller::get_my_professor,
        crate::modules::professors::controller::get_my_divisions,
        crate::modules::professors::controller::get_professor,
        crate::modules::professors::controller::get_professor_divisions,
        crate::modules::professors::controller::update_professor,
        crate::modules::students::controller::list_students,
        crate::modules::students::controller::get_my_student,
        crate::modules::students::controller::get_my_divisions,
        crate::modules::students::controller::get_student,
        crate::modules::students::controller::get_student_divisions,
        crate::modules::students::controller::update_student,
        crate::modules::timeslots::controller::list_timeslots,
        crate::modules::timeslots::controller::get_timeslot,
        crate::modules::timeslots::controller::create_timeslot,
        crate::modules::timeslots::controller::update_timeslot,
        crate::modules::timeslots::controller::delete_timeslot,
        crate::modules::lectures::controller::list_lectures,
        crate::modules::lectures::controller::get_lecture,
        crate::modules::lectures::controller::list_division_lectures,
        crate::modules::lectures::controller::create_lecture,
        crate::modules::lectures::controller::update_lecture,
        crate::modules::lectures::controller::delete_lecture,
        crate::modules::timetable::controller::get_my_timetable,
        crate::modules::timetable::controller::get_division_timetable,
        crate::modules::files::controller::list_my_files,
        crate::modules::files::controller::list_course_files,
        crate::modules::files::controller::get_file,
        crate::modules::files::controller::list_submissions,
        crate::modules::files::controller::upload_file,
        crate::modules::files::controller::update_file,
    ),
    components(
        schemas(
            ListParams,
            LoginForm,
            TokenResponse,
            ResetPasswordRequest,
            MessageResponse,
            User,
            UserType,
            CreateUserDto,
            UpdateUserDto,
            UpdateMeDto,
            Admin,
            CreateAdminDto,
            UpdateAdminDto,
            RemoveAdminDto,
            School,
            CreateSchoolDto,
            UpdateSchoolDto,
            Year,
            CreateYearDto,
            UpdateYearDto,
            Term,
            CreateTermDto,
            UpdateTermDto,
            Course,
            CreateCourseDto,
            UpdateCourseDto,
            Division,
            CreateDivisionDto,
            UpdateDivisionDto,
            StudentDivision,
            DivisionStudent,
            BulkEnrolmentResponse,
            Professor,
            UpdateProfessorDto,
            Student,
            UpdateStudentDto,
            Timeslot,
            CreateTimeslotDto,
            UpdateTimeslotDto,
            Lecture,
            CreateLectureDto,
            UpdateLectureDto,
            Weekday,
            CourseFile,
            UpdateFileDto,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Login", description = "Tokens and password recovery"),
        (name = "Users", description = "User accounts"),
        (name = "Admins", description = "Administrators and their permissions"),
        (name = "Utils", description = "Operational helpers"),
        (name = "Schools", description = "Schools and their members"),
        (name = "Years", description = "Academic years"),
        (name = "Terms", description = "Terms within a year"),
        (name = "Courses", description = "Courses taught in a term"),
        (name = "Divisions", description = "Course divisions and enrolment"),
        (name = "Professors", description = "Professor records"),
        (name = "Students", description = "Student records"),
        (name = "Timeslots", description = "School timeslots"),
        (name = "Lectures", description = "Scheduled lectures"),
        (name = "Timetable", description = "Weekly timetables"),
        (name = "Files", description = "Course documents and submissions")
    ),
    info(
        title = "Campus API",
        version = "0.1.0",
        description = "School administration REST API built with Rust, Axum, and PostgreSQL.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
