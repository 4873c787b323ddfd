mod edits;
mod pace2021;

pub use edits::{write_clustering, write_edit_list};
pub use pace2021::{read_pace2021, read_pace2021_file, Pace2021Error};
