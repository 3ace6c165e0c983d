use crate::config::Config;
use crate::http::connection::Connection;
use tokio::net::TcpListener;
use tracing::info;

pub async fn run(cfg: &Config) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr).await?;
    info!("Listening on {}", cfg.server.listen_addr);

    loop {
        let (socket, peer) = listener.accept().await?;
        info!("Accepted connection from {}", peer);

        let site = cfg.site.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, site);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
        });
    }
}
