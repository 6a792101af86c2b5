use std::path::Path;
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::{error, info};

use serde::Deserialize;
use haiku_gen_core::{Corpus, GenerationConfig, Haiku, HaikuAssembler, HaikuError, SyllableOracle};

const DATA_FOLDER: &str = "./data";

/// Struct representing query parameters for the `/v1/haiku` endpoint
#[derive(Deserialize)]
struct HaikuQuery {
	format: Option<String> // "text" (default) or "json"
}

struct SharedData {
	assembler: HaikuAssembler<SyllableOracle>
}

/// Maps a generation error to an HTTP response.
///
/// - `NoHaikuGenerated` → 409, the caller must generate first
/// - anything else → 500
fn error_response(e: HaikuError) -> HttpResponse {
	match e {
		HaikuError::NoHaikuGenerated => HttpResponse::Conflict().body("Please generate a full haiku first"),
		e => {
			error!("Generation failed: {e}");
			HttpResponse::InternalServerError().body(e.to_string())
		}
	}
}

fn haiku_response(haiku: &Haiku) -> HttpResponse {
	HttpResponse::Ok().body(haiku.to_string())
}

#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let result = shared_data.assembler.generate();
	match result {
		Ok(haiku) => haiku_response(haiku),
		Err(e) => error_response(e),
	}
}

#[put("/v1/regenerate/{line}")]
async fn put_regenerate(data: web::Data<Mutex<SharedData>>, line: web::Path<usize>) -> impl Responder {
	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let result = match line.into_inner() {
		2 => shared_data.assembler.regenerate_line2(),
		3 => shared_data.assembler.regenerate_line3(),
		_ => return HttpResponse::BadRequest().body("Only line 2 or 3 can be regenerated"),
	};

	match result {
		Ok(haiku) => haiku_response(haiku),
		Err(e) => error_response(e),
	}
}

#[get("/v1/haiku")]
async fn get_haiku(data: web::Data<Mutex<SharedData>>, query: web::Query<HaikuQuery>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	let haiku = match shared_data.assembler.haiku() {
		Some(haiku) => haiku,
		None => return error_response(HaikuError::NoHaikuGenerated),
	};

	match query.format.as_deref() {
		None | Some("text") => haiku_response(haiku),
		Some("json") => HttpResponse::Ok().json(haiku),
		Some(_) => HttpResponse::BadRequest().body("Format must be 'text' or 'json'"),
	}
}

/// Loads the training corpus, the syllable tables and the optional config
/// from `DATA_FOLDER`.
///
/// - `train.txt`: training corpus (required)
/// - `cmudict.dict`: pronunciation dictionary (required, cached as `cmudict.bin`)
/// - `missing_words.json`: syllable overrides (optional)
/// - `config.json`: generation config (optional)
fn load_assembler() -> Result<HaikuAssembler<SyllableOracle>, HaikuError> {
	let folder = Path::new(DATA_FOLDER);

	let config_path = folder.join("config.json");
	let config = if config_path.exists() {
		GenerationConfig::load(&config_path)?
	} else {
		GenerationConfig::default()
	};

	let overrides_path = folder.join("missing_words.json");
	let overrides = overrides_path.exists().then_some(&overrides_path);

	let corpus = Corpus::load(folder.join("train.txt"))?;
	let oracle = SyllableOracle::load(folder.join("cmudict.dict"), overrides)?;
	HaikuAssembler::new(corpus, oracle, config)
}

/// Main entry point for the server.
///
/// Builds the haiku assembler, wraps it in a `Mutex` for thread safety,
/// and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Data files are read from `./data`.
/// - Set `RUST_LOG=debug` to trace candidate selection.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init();

	let assembler = match load_assembler() {
		Ok(assembler) => assembler,
		Err(e) => {
			error!("Failed to load haiku model: {e}");
			return Err(std::io::Error::other(e.to_string()));
		}
	};
	let shared_model = web::Data::new(Mutex::new(SharedData { assembler }));

	info!("Listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.service(get_generated)
			.service(put_regenerate)
			.service(get_haiku)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}
