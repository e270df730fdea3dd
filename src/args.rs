use clap::Parser;
use log::LevelFilter;

/// Configurazione da linea di comando
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Porta SSH usata quando la richiesta non ne specifica una
    #[arg(long, default_value = "22")]
    pub default_port: u16,

    /// Timeout (in secondi) per ogni operazione sul server remoto
    #[arg(long, default_value = "30")]
    pub timeout_secs: u64,

    /// Dimensione massima del buffer per il download (in bytes)
    #[arg(long, default_value = "32768")]
    pub read_chunk_size: usize,

    /// Livello di log (sovrascrivibile con RUST_LOG)
    #[arg(long, default_value = "info")]
    pub log_level: LevelFilter,
}
