//! Application state - shared across all handlers.

use std::sync::Arc;

use tera::Tera;

use blog_core::ports::{
    CommentRepository, Mailer, PostRepository, TagRepository, UserRepository,
};
use blog_infra::{
    InMemoryCommentRepository, InMemoryPostRepository, InMemoryTagRepository,
    InMemoryUserRepository, LogMailer, MemoryDatabase,
};

use crate::config::{AppConfig, MailConfig};

#[cfg(feature = "postgres")]
use blog_infra::{
    DatabaseConfig, DatabaseConnections, PostgresCommentRepository, PostgresPostRepository,
    PostgresTagRepository, PostgresUserRepository,
};

/// The four stores, backed by one database.
#[derive(Clone)]
pub struct Repositories {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl Repositories {
    pub fn in_memory(db: MemoryDatabase) -> Self {
        Self {
            posts: Arc::new(InMemoryPostRepository::new(db.clone())),
            comments: Arc::new(InMemoryCommentRepository::new(db.clone())),
            tags: Arc::new(InMemoryTagRepository::new(db.clone())),
            users: Arc::new(InMemoryUserRepository::new(db)),
        }
    }

    #[cfg(feature = "postgres")]
    pub fn postgres(connections: &DatabaseConnections) -> Self {
        let db = &connections.main;
        Self {
            posts: Arc::new(PostgresPostRepository::new(db.clone())),
            comments: Arc::new(PostgresCommentRepository::new(db.clone())),
            tags: Arc::new(PostgresTagRepository::new(db.clone())),
            users: Arc::new(PostgresUserRepository::new(db.clone())),
        }
    }

    /// Connect, bring the schema up to date and build the Postgres stores.
    #[cfg(feature = "postgres")]
    async fn connect(config: &DatabaseConfig) -> Result<Self, migration::DbErr> {
        use migration::MigratorTrait;

        let connections = DatabaseConnections::init(config).await?;
        migration::Migrator::up(&connections.main, None).await?;
        tracing::info!("Database schema is up to date");

        Ok(Self::postgres(&connections))
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub users: Arc<dyn UserRepository>,
    pub mailer: Arc<dyn Mailer>,
    pub templates: Arc<Tera>,
    /// Sender address of outgoing mail.
    pub mail_from: String,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(config: &AppConfig) -> Result<Self, tera::Error> {
        let templates = load_templates(&config.template_dir)?;
        let repositories = Self::repositories(config).await;
        let mailer = Self::mailer(&config.mail);

        tracing::info!("Application state initialized");

        Ok(Self::from_parts(
            repositories,
            mailer,
            templates,
            config.mail.from.clone(),
        ))
    }

    pub fn from_parts(
        repositories: Repositories,
        mailer: Arc<dyn Mailer>,
        templates: Tera,
        mail_from: String,
    ) -> Self {
        Self {
            posts: repositories.posts,
            comments: repositories.comments,
            tags: repositories.tags,
            users: repositories.users,
            mailer,
            templates: Arc::new(templates),
            mail_from,
        }
    }

    #[cfg(feature = "postgres")]
    async fn repositories(config: &AppConfig) -> Repositories {
        let Some(db_config) = &config.database else {
            tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
            return Repositories::in_memory(MemoryDatabase::new());
        };

        match Repositories::connect(db_config).await {
            Ok(repositories) => repositories,
            Err(e) => {
                tracing::error!(
                    "Failed to prepare database: {}. Using in-memory fallback.",
                    e
                );
                Repositories::in_memory(MemoryDatabase::new())
            }
        }
    }

    #[cfg(not(feature = "postgres"))]
    async fn repositories(config: &AppConfig) -> Repositories {
        if config.database.is_some() {
            tracing::warn!("DATABASE_URL ignored: built without the postgres feature");
        }
        tracing::info!("Running without postgres feature - using in-memory store");
        Repositories::in_memory(MemoryDatabase::new())
    }

    fn mailer(config: &MailConfig) -> Arc<dyn Mailer> {
        match &config.api_url {
            #[cfg(feature = "http-mail")]
            Some(url) => {
                tracing::info!(relay = %url, "Mail relay configured");
                Arc::new(blog_infra::HttpMailer::new(url.clone()))
            }
            #[cfg(not(feature = "http-mail"))]
            Some(_) => {
                tracing::warn!("MAIL_API_URL ignored: built without the http-mail feature");
                Arc::new(LogMailer)
            }
            None => Arc::new(LogMailer),
        }
    }
}

/// Compile every template under `dir`.
pub fn load_templates(dir: &str) -> Result<Tera, tera::Error> {
    let tera = Tera::new(&format!("{}/**/*.html", dir.trim_end_matches('/')))?;
    tracing::debug!(
        templates = tera.get_template_names().count(),
        dir = %dir,
        "Templates loaded"
    );
    Ok(tera)
}
