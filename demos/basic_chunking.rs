//! Basic Regulation Chunking
//!
//! The minimal example: chunk a BAB/Pasal regulation for retrieval.
//!
//! ```bash
//! cargo run --example basic_chunking
//! ```

use pasal::{DocumentChunker, InputItem};
use serde_json::{json, Map};

fn main() {
    let document = "PERATURAN PERUSAHAAN\n\n\
        BAB I. Ketentuan Umum\n\
        Pasal 1\n\
        Peraturan ini berlaku bagi seluruh pegawai tetap dan pegawai kontrak.\n\
        Pasal 2\n\
        Hari kerja adalah Senin sampai Jumat, pukul 08.00 sampai 17.00.\n\n\
        BAB II. Cuti\n\
        Pasal 3\n\
        Setiap pegawai berhak atas cuti tahunan dua belas hari kerja.\n\
        Pasal 4\n\
        Cuti sakit diberikan berdasarkan surat keterangan dokter.";

    let items = [InputItem::new(document).with_page_number(1)];
    let mut base = Map::new();
    base.insert("department".into(), json!("HR"));

    let chunks = DocumentChunker::new().chunk_items(&items, &base, Some("peraturan.pdf"));

    println!("Document: {} chars", document.chars().count());
    println!("Chunks: {}\n", chunks.len());

    for chunk in &chunks {
        println!("{} ({} chars)", chunk.title, chunk.len());
        println!("  metadata: {}", serde_json::Value::Object(chunk.metadata.clone()));
        println!("  {}\n", chunk.data.replace('\n', "\n  "));
    }

    // Chapters win over articles: each BAB is one unit, and the
    // Pasal headings stay inside its text.
}
