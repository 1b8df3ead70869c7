pub mod io;
pub mod synmap;
