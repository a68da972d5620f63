pub mod knowledge_check;
pub mod readiness;
