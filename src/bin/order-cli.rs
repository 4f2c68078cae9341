use clap::{Parser, Subcommand};
use serde_json::{json, Value};

#[derive(Parser)]
#[command(name = "order-cli")]
#[command(about = "Inspect and exercise a running order-hook service", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:3001", env = "ORDER_HOOK_URL")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check service health
    Health,
    /// List every stored order
    Orders,
    /// Show one order
    Order {
        id: String,
    },
    /// Report which PayPal credentials the service can see
    Credentials,
    /// Post a synthetic PayPal webhook event
    Simulate {
        #[arg(long, default_value = "PAYMENT.CAPTURE.COMPLETED")]
        event_type: String,
        /// Related order id (highest priority identifier)
        #[arg(long)]
        order_id: Option<String>,
        /// Capture id placed under purchase_units[0].payments.captures[0]
        #[arg(long)]
        capture_id: Option<String>,
        /// Top-level resource id
        #[arg(long)]
        resource_id: Option<String>,
        #[arg(long, default_value = "10.00")]
        amount: String,
        #[arg(long, default_value = "USD")]
        currency: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    match cli.command {
        Commands::Health => {
            let res = client.get(format!("{}/api/health", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Orders => {
            let res = client.get(format!("{}/api/orders", base)).send().await?;
            print_response(res).await?;
        }
        Commands::Order { id } => {
            let res = client.get(format!("{}/api/orders/{}", base, id)).send().await?;
            print_response(res).await?;
        }
        Commands::Credentials => {
            let res = client
                .get(format!("{}/api/verify-credentials", base))
                .send()
                .await?;
            print_response(res).await?;
        }
        Commands::Simulate {
            event_type,
            order_id,
            capture_id,
            resource_id,
            amount,
            currency,
        } => {
            let event = synthetic_event(
                &event_type,
                order_id.as_deref(),
                capture_id.as_deref(),
                resource_id.as_deref(),
                &amount,
                &currency,
            );
            let res = client
                .post(format!("{}/api/webhook/paypal", base))
                .json(&event)
                .send()
                .await?;
            print_response(res).await?;
        }
    }

    Ok(())
}

fn synthetic_event(
    event_type: &str,
    order_id: Option<&str>,
    capture_id: Option<&str>,
    resource_id: Option<&str>,
    amount: &str,
    currency: &str,
) -> Value {
    let mut resource = json!({
        "amount": {"value": amount, "currency_code": currency},
        "create_time": chrono::Utc::now().to_rfc3339(),
    });
    if let Some(id) = resource_id {
        resource["id"] = json!(id);
    }
    if let Some(id) = order_id {
        resource["supplementary_data"] = json!({"related_ids": {"order_id": id}});
    }
    if let Some(id) = capture_id {
        resource["purchase_units"] = json!([{"payments": {"captures": [{"id": id}]}}]);
    }

    json!({
        "id": format!("WH-{}", uuid::Uuid::new_v4()),
        "event_type": event_type,
        "create_time": chrono::Utc::now().to_rfc3339(),
        "resource_type": "capture",
        "summary": "Simulated by order-cli",
        "resource": resource,
    })
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;
    if !status.is_success() {
        eprintln!("Error: service returned status {}", status);
        eprintln!("Response: {}", text);
        return Ok(());
    }

    let json: Value = serde_json::from_str(&text)?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
