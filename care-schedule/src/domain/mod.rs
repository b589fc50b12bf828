pub mod layout;
pub mod missed;
pub mod models;
pub mod shift_assign;
pub mod shift_role;
pub mod validation;
