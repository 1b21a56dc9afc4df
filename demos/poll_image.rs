use huixing_image_client::{with_width, Config, HuixingImageClient};
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load env (if .env present)
    Config::dotenv_load();
    let cfg = Config::new()?;
    let client = HuixingImageClient::new(cfg.client_config()?);

    let task = client
        .generate_image("a lighthouse at dusk, oil painting", [with_width(768)])
        .await?;
    println!("Submitted task {}", task.task_id());

    // The client never polls on its own; give up after a minute.
    for _ in 0..12 {
        let res = client.get_task_status(task.task_id()).await?;
        if let Some(url) = res.image_url() {
            println!("Image ready: {}", url);
            return Ok(());
        }
        tokio::time::sleep(Duration::from_secs(5)).await;
    }
    println!("Task {} still processing", task.task_id());
    Ok(())
}
