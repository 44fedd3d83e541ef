mod db_setup;
mod insert;
mod materialize;
mod parse;
mod records;
mod run;

pub use run::run;
