use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use scanme_qr::render::ImageHandle;
use scanme_qr::scanner::ImageSource;
use scanme_qr::{StudentRef, codec, enhance_for_scanning, render, scan_image};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "scanme", version, about = "ScanMe QR code tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a QR code for one student
    Generate {
        #[arg(long)]
        id: String,
        #[arg(long)]
        student_no: String,
        /// Write a PNG here instead of printing a data URI
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Render QR codes for every student in a roster file
    Batch {
        /// One student per line: id,student_no,first,last
        #[arg(long)]
        list: PathBuf,
        #[arg(long)]
        out_dir: PathBuf,
    },
    /// Scan an image file for QR codes
    Scan {
        #[arg(long)]
        image: PathBuf,
        /// Run the enhancement pre-pass before scanning
        #[arg(long)]
        enhance: bool,
        /// Print results as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Validate payload text against the format and expiry policy
    Validate {
        #[arg(long)]
        text: String,
    },
    /// Print a summary of payload text
    Info {
        #[arg(long)]
        text: String,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate {
            id,
            student_no,
            out,
        } => generate_cmd(&id, &student_no, out.as_deref()),
        Command::Batch { list, out_dir } => batch_cmd(&list, &out_dir),
        Command::Scan {
            image,
            enhance,
            json,
        } => scan_cmd(&image, enhance, json),
        Command::Validate { text } => validate_cmd(&text),
        Command::Info { text } => info_cmd(&text),
    }
}

fn generate_cmd(id: &str, student_no: &str, out: Option<&Path>) {
    let student = StudentRef::new(id, student_no);

    match out {
        Some(path) => match render::render_to_file(&student, path) {
            Ok(written) => println!("Wrote {}", written.display()),
            Err(err) => eprintln!("Failed to write QR code: {err}"),
        },
        None => {
            let uri = render::render_image(&student)
                .and_then(|img| render::to_data_uri(ImageHandle::Image(&img)));
            match uri {
                Ok(uri) => println!("{uri}"),
                Err(err) => eprintln!("Failed to render QR code: {err}"),
            }
        }
    }
}

fn batch_cmd(list: &Path, out_dir: &Path) {
    let content = match fs::read_to_string(list) {
        Ok(content) => content,
        Err(err) => {
            eprintln!("Failed to read roster {}: {err}", list.display());
            return;
        }
    };

    let students = parse_roster(&content);
    if students.is_empty() {
        println!("No students found in {}", list.display());
        return;
    }

    match render::generate_batch(&students, out_dir) {
        Ok(report) => {
            println!(
                "Generated {}/{} QR codes in {}",
                report.success.len(),
                report.total,
                out_dir.display()
            );
            for failure in &report.failed {
                println!(
                    "  failed {}: {}",
                    failure.student_no.as_deref().unwrap_or("<no student_no>"),
                    failure.error
                );
            }
        }
        Err(err) => eprintln!("Batch generation failed: {err}"),
    }
}

fn parse_roster(content: &str) -> Vec<StudentRef> {
    content
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                return None;
            }
            let mut fields = line.split(',').map(|field| {
                let field = field.trim();
                if field.is_empty() {
                    None
                } else {
                    Some(field.to_string())
                }
            });
            Some(StudentRef {
                id: fields.next().flatten(),
                student_no: fields.next().flatten(),
                first_name: fields.next().flatten(),
                last_name: fields.next().flatten(),
            })
        })
        .collect()
}

fn scan_cmd(image_path: &Path, enhance: bool, json: bool) {
    let results = if enhance {
        match image::open(image_path) {
            Ok(bitmap) => {
                let enhanced = enhance_for_scanning(&bitmap);
                scan_image(ImageSource::Bitmap(&enhanced))
            }
            Err(err) => {
                eprintln!("Failed to load image {}: {err}", image_path.display());
                return;
            }
        }
    } else {
        scan_image(ImageSource::Path(image_path))
    };

    if json {
        match serde_json::to_string_pretty(&results) {
            Ok(out) => println!("{out}"),
            Err(err) => eprintln!("Failed to serialize results: {err}"),
        }
        return;
    }

    println!("Found {} QR codes in {}", results.len(), image_path.display());
    for (i, result) in results.iter().enumerate() {
        match &result.payload {
            Some(payload) => println!(
                "  QR {}: student_id={} student_no={} issued_at={}",
                i, payload.student_id, payload.student_no, payload.timestamp
            ),
            None => println!("  QR {}: foreign content '{}'", i, result.text),
        }
        if let Some(bbox) = result.bounds {
            println!(
                "        bbox x={} y={} w={} h={}",
                bbox.x, bbox.y, bbox.width, bbox.height
            );
        }
    }
}

fn validate_cmd(text: &str) {
    match codec::validate(text) {
        Ok(payload) => println!(
            "Valid QR code for student_id={} student_no={}",
            payload.student_id, payload.student_no
        ),
        Err(err) => println!("{err}"),
    }
}

fn info_cmd(text: &str) {
    match codec::describe(text) {
        Ok(summary) => {
            println!("student_id: {}", summary.student_id);
            println!("student_no: {}", summary.student_no);
            println!("created_at: {}", summary.created_at.to_rfc3339());
            println!("age_days:   {}", summary.age_days);
            println!("age_hours:  {:.2}", summary.age_hours);
            println!("is_recent:  {}", summary.is_recent);
            println!("is_valid:   {}", summary.is_valid);
        }
        Err(err) => println!("{err}"),
    }
}
