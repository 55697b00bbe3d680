use tasktrack::application::task_service::TaskServiceImpl;
use tasktrack::infrastructure::file_repo::FileTaskRepository;
use tasktrack::infrastructure::file_store::StoreConfig;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::var("TASKS_DB_PATH").unwrap_or_else(|_| "db.txt".to_string());
    tracing::debug!(%path, "using task file");
    let repo = FileTaskRepository::new(StoreConfig::at(path));
    let service = TaskServiceImpl::new(repo);
    tasktrack::menu::run(&service)
}
