pub mod audio;
pub mod history;
pub mod playback;
pub mod script;
pub mod synthesis;
pub mod voice;
