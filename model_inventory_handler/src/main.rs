use config::Config;
use lambda_http::{
    Error, Request, run, service_fn,
    tracing::{self, subscriber::EnvFilter},
};

mod config;
mod handler;
mod model;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing::subscriber::fmt()
        .with_ansi(false)
        .with_env_filter(EnvFilter::from_default_env())
        .with_line_number(true)
        .json()
        .with_current_span(true)
        .with_span_list(false)
        .flatten_event(true)
        .init();

    tracing::trace!("initiating lambda");

    let config = Config::from_env()?;
    tracing::trace!("initialized config");

    let aws_config = config::load_aws_config().await;
    let s3_client = s3_client::S3::new(aws_sdk_s3::Client::new(&aws_config));
    tracing::trace!("initialized s3 client");

    let shared_s3_client = &s3_client;
    let shared_config = &config;

    let func = service_fn(move |event: Request| {
        let s3_client = shared_s3_client;
        let config = shared_config;

        async move { handler::handler(s3_client, config, event).await }
    });

    run(func).await
}
