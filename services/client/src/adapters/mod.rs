pub mod assistant_llm;
pub mod mock_backend;
pub mod prompts;

pub use assistant_llm::OpenAiRecipeAssistant;
pub use mock_backend::MockBackend;
