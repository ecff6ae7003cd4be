mod content_service_test;
mod video_service_test;
