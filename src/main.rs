use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stockfile::{ProductDraft, ProductStore};

fn draft(
    title: &str,
    description: &str,
    price: f64,
    thumbnail: &str,
    code: &str,
    stock: u32,
) -> ProductDraft {
    ProductDraft {
        title: title.to_owned(),
        description: description.to_owned(),
        price,
        thumbnail: thumbnail.to_owned(),
        code: code.to_owned(),
        stock,
    }
}

/// Walks the store through every operation once: list, adds (including a
/// duplicate), lookups, a retitle and a delete. Errors are logged, never
/// fatal; running it twice demonstrates the duplicate rejections.
#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "products.json".to_owned());
    let mut store = ProductStore::open(path.as_str())
        .await
        .with_context(|| format!("opening product store at {path}"))?;

    match store.list().await {
        Ok(products) => info!("initial products: {products:?}"),
        Err(err) => warn!(%err, "could not list products"),
    }

    let drafts = [
        draft("The Car", "Arctic Monkeys", 12000.0, "ruta/tcam.jpg", "A007", 9),
        draft("Hot Fuss", "The Killers", 15000.0, "ruta/.jpg", "A008", 8),
        draft("The New Abnormal", "The Strokes", 10000.0, "ruta/tna.jpg", "A009", 6),
    ];
    for d in drafts {
        if let Err(err) = store.add(d).await {
            warn!(%err, "add rejected");
        }
    }

    // Same code as the first draft; the store must turn this one away.
    if let Err(err) = store
        .add(draft("Favourite Worst Nightmare", "Arctic Monkeys", 11000.0, "ruta/fwn.jpg", "A007", 3))
        .await
    {
        warn!(%err, "add rejected");
    }

    match store.get(17).await {
        Ok(None) => info!("product 17 is absent, as expected"),
        Ok(Some(product)) => info!("found {product:?}"),
        Err(err) => warn!(%err, "lookup failed"),
    }

    if let Err(err) = store
        .add(draft("Abbey Road", "The Beatles", 9999.0, "ruta/artb.jpg", "A010", 2))
        .await
    {
        warn!(%err, "add rejected");
    }

    match store.get(2).await {
        Ok(found) => info!("product 2: {found:?}"),
        Err(err) => warn!(%err, "lookup failed"),
    }

    match store.update_title(4, "Abbey Road (Remastered)").await {
        Ok(Some(product)) => info!("updated: {product:?}"),
        Ok(None) => info!("nothing to update"),
        Err(err) => warn!(%err, "update rejected"),
    }

    match store.delete(2).await {
        Ok(Some(product)) => info!("deleted: {product:?}"),
        Ok(None) => info!("nothing to delete"),
        Err(err) => warn!(%err, "delete failed"),
    }

    match store.list().await {
        Ok(products) => info!("final products: {products:?}"),
        Err(err) => warn!(%err, "could not list products"),
    }

    Ok(())
}
