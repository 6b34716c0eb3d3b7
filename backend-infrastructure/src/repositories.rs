pub mod event_files;

pub use event_files::FileEventRepository;
