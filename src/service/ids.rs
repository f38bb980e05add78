/// Идентификаторы заявок на обслуживание

use chrono::{DateTime, Local};
use rand::Rng;

const ID_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// `VOL` + метка времени `%Y%m%d%H%M%S` + 4 случайных символа
pub fn generate_service_id<R: Rng>(now: DateTime<Local>, rng: &mut R) -> String {
    let suffix: String = (0..4)
        .map(|_| ID_ALPHABET[rng.gen_range(0..ID_ALPHABET.len())] as char)
        .collect();
    format!("VOL{}{}", now.format("%Y%m%d%H%M%S"), suffix)
}

pub fn new_service_id() -> String {
    generate_service_id(Local::now(), &mut rand::thread_rng())
}
