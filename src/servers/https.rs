//! Module for the HTTPS server, a TLS accept loop wrapped around the
//! framework request handler. Certificates are loaded from disk and
//! every request on every accepted connection is delegated to the
//! router.

use crate::config::Config;
use axum::Router;
use hyper_util::{
    rt::{TokioExecutor, TokioIo},
    server::conn::auto,
    service::TowerToHyperService,
};
use log::{debug, error, info};
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use std::{
    fs::File,
    io::{self, BufReader},
    sync::Arc,
};
use thiserror::Error;
use tokio::net::TcpListener;
use tokio_rustls::TlsAcceptor;

/// Errors that can occur while loading the TLS identity from disk
#[derive(Debug, Error)]
pub enum TlsError {
    /// The key or certificate file could not be read
    #[error("Failed to read key/certificate file: {0}")]
    IO(#[from] io::Error),
    /// The key file contained no usable private key
    #[error("No private key found in the key file")]
    MissingPrivateKey,
    /// The key and certificate chain were rejected
    #[error("Rejected key/certificate pair: {0}")]
    BadIdentity(#[from] rustls::Error),
}

/// Starts the HTTPS server, delegating every request on every
/// accepted connection to the provided router
pub async fn start_server(config: Config, router: Router) {
    // Load the TLS identity before binding anything
    let acceptor = match load_acceptor(&config) {
        Ok(value) => value,
        Err(err) => {
            error!("Failed to load TLS identity: {err}");
            panic!()
        }
    };

    let listener = match TcpListener::bind((config.host, config.port)).await {
        Ok(value) => {
            info!(
                "Started HTTPS server (https://{}:{})",
                config.host, config.port
            );
            value
        }
        Err(_) => {
            error!("Failed to bind HTTPS server (Port: {})", config.port);
            panic!()
        }
    };

    let service = TowerToHyperService::new(router);

    // Accept incoming connections
    loop {
        let (stream, addr) = match listener.accept().await {
            Ok(value) => value,
            Err(err) => {
                error!("Failed to accept HTTPS connection: {err:?}");
                continue;
            }
        };

        let acceptor = acceptor.clone();
        let service = service.clone();

        tokio::spawn(async move {
            // Handshake failures are logged and the connection dropped
            let stream = match acceptor.accept(stream).await {
                Ok(value) => value,
                Err(err) => {
                    debug!("Failed TLS handshake from {addr}: {err:?}");
                    return;
                }
            };

            if let Err(err) = auto::Builder::new(TokioExecutor::new())
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                debug!("Error occurred handling {addr}: {err:?}");
            }
        });
    }
}

/// Loads the PEM encoded key and certificate chain from the configured
/// paths, building the TLS acceptor used by the accept loop
fn load_acceptor(config: &Config) -> Result<TlsAcceptor, TlsError> {
    let mut cert_reader = BufReader::new(File::open(&config.tls.certificate)?);
    let certificates = rustls_pemfile::certs(&mut cert_reader)
        .collect::<Result<Vec<CertificateDer>, io::Error>>()?;

    let mut key_reader = BufReader::new(File::open(&config.tls.key)?);
    let key: PrivateKeyDer = rustls_pemfile::private_key(&mut key_reader)?
        .ok_or(TlsError::MissingPrivateKey)?;

    let tls_config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(certificates, key)?;

    Ok(TlsAcceptor::from(Arc::new(tls_config)))
}
