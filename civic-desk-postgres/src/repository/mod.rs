pub mod audit;
pub mod complaint;
pub mod db_init;
pub mod directory;
