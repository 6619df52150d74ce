pub mod audit_service;
pub mod extraction_service;
pub mod generation_service;
pub mod llm_service;
pub mod places_service;
pub mod prompt_service;
pub mod restaurant_service;
