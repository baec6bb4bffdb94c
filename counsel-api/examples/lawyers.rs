use counsel_api::endpoints::lawyers::vip_lawyers;
use counsel_api::{ApiError, CallOptions, Client, DEFAULT_BASE_URL, Request};

#[tokio::main]
pub async fn main() -> Result<(), ApiError> {
    let client = Client::new(DEFAULT_BASE_URL)?;

    let req = Request::lawyers().list().city("Hanoi").limit(20u32);

    let page = client.public_call(req, CallOptions::new()).await?;
    for lawyer in vip_lawyers(&page.items) {
        println!("{} ({:.1})", lawyer.full_name, lawyer.rating);
    }
    Ok(())
}
