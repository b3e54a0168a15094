/// Reading of sectioned mechanism files and the bundled default mechanism
pub mod load_from_file;
