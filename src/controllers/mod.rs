pub mod health;
pub mod history;
pub mod player;
pub mod script;
pub mod synthesis;
pub mod voice;
