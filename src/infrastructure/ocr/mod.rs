mod google_vision_client;
mod mock_ocr_engine;

pub use google_vision_client::{
    AnnotateResponse, DEFAULT_VISION_ENDPOINT, GoogleVisionClient,
};
pub use mock_ocr_engine::MockOcrEngine;
