use scoreboard::board::Board;
use scoreboard::routes::routes;
use scoreboard::state::AppState;
use std::collections::HashMap;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use util::homework;
use util::paths;

#[tokio::main]
async fn main() {
    let _log_guard = common::logger::init_logging(
        &common::config::log_file(),
        common::config::log_to_stdout(),
    );

    paths::ensure_dir(paths::storage_root()).expect("failed to create storage directory");
    paths::ensure_dir(paths::output_root()).expect("failed to create output directory");

    // Malformed descriptors are a fatal configuration error; refusing to
    // start beats serving a partial homework set.
    let homeworks = match homework::load_homework_dir(common::config::config_dir()) {
        Ok(homeworks) => homeworks,
        Err(e) => {
            eprintln!("invalid homework configuration: {e}");
            std::process::exit(1);
        }
    };

    let mut boards = HashMap::new();
    for hw in homeworks {
        tracing::info!(homework = %hw.name, cases = hw.cases.len(), "loading homework");
        let board = Board::load(hw);
        boards.insert(board.homework().name.clone(), board);
    }
    let state = AppState::new(boards);
    tracing::info!(homeworks = state.len(), "boards ready");

    let cors = CorsLayer::very_permissive();
    let app = routes(state).layer(cors);

    let addr: SocketAddr = format!("{}:{}", common::config::host(), common::config::port())
        .parse()
        .expect("Invalid address");

    println!(
        "Starting {} on http://{}",
        common::config::project_name(),
        addr
    );

    axum::serve(
        TcpListener::bind(&addr).await.expect("Failed to bind"),
        app,
    )
    .await
    .expect("Server crashed");
}
