use crate::config::Config;
use crate::db::audit;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use std::fs;
use std::path::{Path, PathBuf};
use zip::ZipWriter;
use zip::write::FileOptions;

pub struct BackupLogic;

impl BackupLogic {
    pub fn backup(
        pool: &mut DbPool,
        cfg: &Config,
        dest_file: &str,
        compress: bool,
    ) -> AppResult<()> {
        let src = Path::new(&cfg.database);
        let dest = crate::utils::path::expand_tilde(dest_file);
        let dest = dest.as_path();

        if !src.exists() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Database not found: {}", src.display()),
            )
            .into());
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }

        // Existing destination → ask before clobbering
        if dest.exists() {
            warning(format!(
                "The file '{}' already exists. Overwrite? [y/N]:",
                dest.display()
            ));

            use std::io::{Write, stdin, stdout};

            let mut answer = String::new();
            print!("> ");
            stdout().flush().ok();
            stdin().read_line(&mut answer)?;

            let answer = answer.trim().to_lowercase();
            if !(answer == "y" || answer == "yes") {
                println!("Backup cancelled.");
                return Ok(());
            }
            println!();
        }

        fs::copy(src, dest)?;
        success(format!("Backup created: {}", dest.display()));

        let final_path = if compress {
            let compressed = compress_backup(dest)?;

            if compressed != dest.to_path_buf() {
                if let Err(e) = fs::remove_file(dest) {
                    warning(format!("Failed to remove uncompressed backup: {}", e));
                } else {
                    success(format!("Compressed: {}", compressed.display()));
                }
            }

            compressed
        } else {
            dest.to_path_buf()
        };

        // Best-effort audit trail entry for the backup
        if let Err(e) = audit::append(
            &pool.conn,
            "backup",
            &format!("Database backup to {}", final_path.display()),
            None,
            None,
        ) {
            warning(format!("audit log write failed: {}", e));
        }

        Ok(())
    }
}

fn compress_backup(path: &Path) -> AppResult<PathBuf> {
    let zip_path = path.with_extension("zip");

    let file = fs::File::create(&zip_path)?;
    let mut zip = ZipWriter::new(file);

    let options: FileOptions<'_, ()> =
        FileOptions::default().compression_method(zip::CompressionMethod::Deflated);

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "database.sqlite".to_string());

    zip.start_file(name, options)
        .map_err(|e| std::io::Error::other(format!("zip start_file: {}", e)))?;

    let content = fs::read(path)?;
    std::io::Write::write_all(&mut zip, &content)?;

    zip.finish()
        .map_err(|e| std::io::Error::other(format!("zip finish: {}", e)))?;

    Ok(zip_path)
}
