use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log_visitor::{function_handler, DynamoStore};
use serde_json::Value;
use tracing::info;

const TRACE_DEBUG: &str = "TRACE_DEBUG";

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(match std::env::var(TRACE_DEBUG) {
            Ok(_) => tracing::Level::DEBUG,
            Err(_) => tracing::Level::INFO
        })
        // disable printing the name of the module in every log line.
        .with_target(false)
        // disabling time is handy because CloudWatch will add the ingestion time.
        .without_time()
        .init();

    info!("Lambda Execution Started");
    let store = DynamoStore::shared().await;

    run(service_fn(move |event: LambdaEvent<Value>| function_handler(store, event))).await
}
