pub mod prelude;

pub mod url;
