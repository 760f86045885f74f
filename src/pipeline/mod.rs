pub mod formula;
pub mod models;
pub mod stage;
pub mod validator;
