pub mod docs;
pub mod health;
pub mod methods;
pub mod ui;
