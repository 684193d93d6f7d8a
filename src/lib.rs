pub mod logger;
pub mod video_pipeline;
