//! Beyond Whispers console front end.
//!
//! Onboards (or resumes) a profile, prints the dashboard, then runs a chat
//! loop with a few slash commands for the other features.

use std::sync::Arc;

use thiserror::Error;
use tokio::io::{stdin, AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use beyond_whispers::adapters::ai::{GeminiClient, MockCompletionClient};
use beyond_whispers::adapters::profile::FileProfileStore;
use beyond_whispers::application::{
    ChatHandler, FeatureError, ProfileHandler, SessionContext, StoryHandler, TopicHandler,
};
use beyond_whispers::config::{AiProvider, AppConfig, ConfigError, LoggingConfig, ValidationError};
use beyond_whispers::domain::profile::ProfileForm;
use beyond_whispers::ports::CompletionClient;

const HELP: &str = "Commands: /story, /topics, /topic <title>, /start-over, /help, /quit";

#[derive(Debug, Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid configuration: {0}")]
    Validation(#[from] ValidationError),

    #[error("could not build HTTP client: {0}")]
    Http(#[from] reqwest::Error),

    #[error("console I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("{}", .0.user_message())]
    Feature(#[from] FeatureError),
}

#[tokio::main]
async fn main() {
    let config = match AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    init_logging(&config.logging);

    if let Err(e) = run(config).await {
        error!(error = %e, "Exiting after fatal error");
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.filter.as_str()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run(config: AppConfig) -> Result<(), CliError> {
    config.validate()?;

    let client: Arc<dyn CompletionClient> = match config.ai.provider {
        AiProvider::Gemini => Arc::new(GeminiClient::new(config.ai.gemini()?)?),
        AiProvider::Mock => Arc::new(MockCompletionClient::new()),
    };
    let info = client.provider_info();
    info!(provider = %info.name, model = %info.model, "Completion client ready");

    let store = Arc::new(FileProfileStore::new(&config.storage.profile_path));
    let console = Console {
        lines: BufReader::new(stdin()).lines(),
        profiles: ProfileHandler::new(store),
        chat: ChatHandler::new(client.clone()),
        stories: StoryHandler::new(client.clone()),
        topics: TopicHandler::new(client),
    };
    console.run().await
}

struct Console {
    lines: Lines<BufReader<Stdin>>,
    profiles: ProfileHandler,
    chat: ChatHandler,
    stories: StoryHandler,
    topics: TopicHandler,
}

enum Flow {
    Continue,
    StartOver,
    Quit,
}

impl Console {
    async fn run(mut self) -> Result<(), CliError> {
        let mut ctx = self.profiles.resume().await?;
        loop {
            if ctx.profile().is_none() {
                match self.onboard().await? {
                    Some(fresh) => ctx = fresh,
                    None => return Ok(()),
                }
            }
            self.show_dashboard(&ctx);
            println!("{}", self.chat.open(&ctx).await?);
            println!("{}", HELP);

            match self.chat_loop(&ctx).await? {
                Flow::Quit => return Ok(()),
                Flow::StartOver => ctx = self.profiles.start_over().await?,
                Flow::Continue => {}
            }
        }
    }

    async fn prompt(&mut self, label: &str) -> Result<Option<String>, CliError> {
        println!("{}", label);
        Ok(self.lines.next_line().await?)
    }

    /// Asks for the profile until it validates. `None` on end of input.
    async fn onboard(&mut self) -> Result<Option<SessionContext>, CliError> {
        println!("Welcome to Beyond Whispers! Tell us a little about yourself.");
        loop {
            let Some(name) = self.prompt("Name:").await? else { return Ok(None) };
            let Some(age) = self.prompt("Age:").await? else { return Ok(None) };
            let Some(gender) = self.prompt("Gender:").await? else { return Ok(None) };

            match self.profiles.submit(&ProfileForm::new(name, age, gender)).await {
                Ok(ctx) => return Ok(Some(ctx)),
                Err(e @ FeatureError::Validation(_)) => println!("{}", e.user_message()),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn show_dashboard(&self, ctx: &SessionContext) {
        let Some(profile) = ctx.profile() else { return };
        let dashboard = self.profiles.dashboard(profile);
        println!("{}", dashboard.greeting);
        println!("{}", dashboard.audience);
        for feature in dashboard.features {
            println!("  - {}: {}", feature.name, feature.description);
        }
    }

    async fn chat_loop(&mut self, ctx: &SessionContext) -> Result<Flow, CliError> {
        loop {
            let Some(line) = self.prompt("You:").await? else { return Ok(Flow::Quit) };
            let line = line.trim();
            let flow = match line {
                "" => Flow::Continue,
                "/quit" => Flow::Quit,
                "/start-over" => Flow::StartOver,
                "/help" => {
                    println!("{}", HELP);
                    Flow::Continue
                }
                "/story" => {
                    self.story(ctx).await;
                    Flow::Continue
                }
                "/topics" => {
                    self.topic_list(ctx).await;
                    Flow::Continue
                }
                _ => {
                    if let Some(title) = line.strip_prefix("/topic ") {
                        self.topic_detail(ctx, title).await;
                    } else {
                        self.send(ctx, line).await;
                    }
                    Flow::Continue
                }
            };
            if !matches!(flow, Flow::Continue) {
                return Ok(flow);
            }
        }
    }

    async fn send(&self, ctx: &SessionContext, message: &str) {
        // The transcript already holds the apology on failure.
        let _ = self.chat.send(ctx, message).await;
        if let Some(entry) = ctx.transcript().await.last() {
            println!("Sahayak: {}", entry.text);
        }
    }

    async fn story(&self, ctx: &SessionContext) {
        match self.stories.generate(ctx).await {
            Ok(story) => {
                println!("== {} ==", story.title);
                println!("{}", story.text);
                println!("Think about it:");
                for question in &story.questions {
                    println!("  * {}", question);
                }
            }
            Err(e) => println!("{}", e.user_message()),
        }
    }

    async fn topic_list(&self, ctx: &SessionContext) {
        match self.topics.list(ctx).await {
            Ok(list) => {
                for topic in &list.topics {
                    println!("  - {}: {}", topic.title, topic.description);
                }
                println!("Use /topic <title> to read more.");
            }
            Err(e) => println!("{}", e.user_message()),
        }
    }

    async fn topic_detail(&self, ctx: &SessionContext, title: &str) {
        match self.topics.detail(ctx, title).await {
            Ok(detail) => println!("{}", detail.content),
            Err(e) => println!("{}", e.user_message()),
        }
    }
}
