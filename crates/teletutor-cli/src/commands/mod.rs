pub mod repl;
pub mod request;
pub mod run;
