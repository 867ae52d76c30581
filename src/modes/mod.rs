pub mod classic;
pub mod interactive;
pub mod serve;
