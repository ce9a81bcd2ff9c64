pub mod domain;
pub mod gateway;
pub mod ports;
pub mod store;

pub use domain::{
    AiRecommendation, AppNotification, Credentials, GroceryItem, GroceryList, Mood, MoodEntry,
    NewMoodEntry, PantryItem, Recipe, Registration, SearchFilters, Timer, User, UserPreferences,
};
pub use gateway::{Gateway, GatewayServices, RequestHandle, RequestPhase};
pub use ports::{
    AuthService, MoodJournalService, PortError, PortResult, RecipeAssistantService,
    RecipeCatalogService, RecommendationRequest,
};
pub use store::{
    Action, Lifecycle, Middleware, RequestId, ResponsePolicy, StateTree, Store, TracingMiddleware,
};
