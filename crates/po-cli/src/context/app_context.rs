use po_config::PoConfig;
use po_core::permissions::PermissionResolver;
use po_core::transitions::StatusTransitionModel;
use po_schema::SchemaRegistry;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: PoConfig,
    pub model: StatusTransitionModel,
    pub resolver: PermissionResolver,
    pub schemas: SchemaRegistry,
}

impl AppContext {
    #[must_use]
    pub fn new(config: PoConfig) -> Self {
        let model = StatusTransitionModel::new(config.transitions.policy());
        tracing::debug!(policy = ?model.policy(), "transition model ready");
        Self {
            config,
            model,
            resolver: PermissionResolver::new(),
            schemas: SchemaRegistry::new(),
        }
    }
}
