pub use campus_models::lectures::*;
