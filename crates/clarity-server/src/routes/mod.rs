pub mod health;
pub mod history;
