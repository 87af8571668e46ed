//! Battle Optimizer Server
//!
//! Line-delimited JSON-RPC over stdio. Exposes battle optimization and the
//! boss trainer list as tools.

use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use battle_optimizer::config::OptimizerConfig;
use battle_optimizer::service::{boss_trainers, BattleOptimizer, OptimizeRequest};
use clap::Parser;
use serde_json::{json, Value};

#[derive(Parser, Debug)]
#[command(name = "optimizer-server")]
#[command(about = "Serve battle optimization requests over stdio")]
struct Args {
    /// RON config file with search bounds and the default algorithm
    #[arg(long)]
    config: Option<PathBuf>,
}

struct OptimizerServer {
    optimizer: BattleOptimizer,
}

fn text_content(text: impl Into<String>) -> Value {
    json!({
        "content": [{"type": "text", "text": text.into()}]
    })
}

fn error_content(message: impl std::fmt::Display) -> Value {
    json!({
        "content": [{"type": "text", "text": format!("Error: {}", message)}],
        "isError": true
    })
}

impl OptimizerServer {
    fn new(config: OptimizerConfig) -> Self {
        Self {
            optimizer: BattleOptimizer::new(config),
        }
    }

    fn handle_request(&self, method: &str, params: &Value) -> Value {
        match method {
            "initialize" => {
                json!({
                    "capabilities": {
                        "tools": {}
                    },
                    "serverInfo": {
                        "name": "battle-optimizer",
                        "version": env!("CARGO_PKG_VERSION")
                    }
                })
            }
            "tools/list" => {
                json!({
                    "tools": [
                        {
                            "name": "optimize_battle",
                            "description": "Find the fastest winning move sequence against a custom team or a boss trainer",
                            "inputSchema": {
                                "type": "object",
                                "properties": {
                                    "playerTeam": {
                                        "type": "array",
                                        "description": "1-6 Pokemon: name, types, base_stats, moves or selectedMoves, optional level"
                                    },
                                    "opponentTeam": {
                                        "type": "array",
                                        "description": "Custom opponent team, same shape as playerTeam"
                                    },
                                    "bossTrainer": {
                                        "type": "string",
                                        "description": "Boss trainer id: blue, giovanni or lance"
                                    },
                                    "algorithm": {
                                        "type": "string",
                                        "description": "greedy, dp or dijkstra"
                                    },
                                    "playerLevel": {
                                        "type": "number",
                                        "description": "Level for Pokemon without their own (1-100)"
                                    }
                                },
                                "required": ["playerTeam"]
                            }
                        },
                        {
                            "name": "list_boss_trainers",
                            "description": "List the preset boss trainers",
                            "inputSchema": {
                                "type": "object",
                                "properties": {}
                            }
                        }
                    ]
                })
            }
            "tools/call" => {
                let tool_name = params["name"].as_str().unwrap_or("");
                let args = &params["arguments"];
                self.handle_tool_call(tool_name, args)
            }
            _ => {
                json!({
                    "error": {
                        "code": -32601,
                        "message": "Method not found"
                    }
                })
            }
        }
    }

    fn handle_tool_call(&self, tool_name: &str, args: &Value) -> Value {
        match tool_name {
            "optimize_battle" => {
                let request: OptimizeRequest = match serde_json::from_value(args.clone()) {
                    Ok(request) => request,
                    Err(e) => return error_content(format!("invalid arguments: {}", e)),
                };
                match self.optimizer.optimize(&request) {
                    Ok(response) => match serde_json::to_string_pretty(&response) {
                        Ok(text) => text_content(text),
                        Err(e) => error_content(e),
                    },
                    Err(e) => {
                        tracing::warn!(error = %e, "optimize_battle rejected");
                        error_content(e)
                    }
                }
            }
            "list_boss_trainers" => match serde_json::to_string_pretty(&boss_trainers()) {
                Ok(text) => text_content(text),
                Err(e) => error_content(e),
            },
            _ => error_content(format!("Unknown tool: {}", tool_name)),
        }
    }

    fn run(&self) -> io::Result<()> {
        let stdin = io::stdin();
        let mut stdout = io::stdout();
        let reader = BufReader::new(stdin.lock());

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let request: Value = match serde_json::from_str(&line) {
                Ok(req) => req,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unparseable request line");
                    continue;
                }
            };

            let id = request["id"].clone();
            let method = request["method"].as_str().unwrap_or("");
            let params = &request["params"];
            tracing::debug!(method, "request");

            let result = self.handle_request(method, params);

            let response = json!({
                "jsonrpc": "2.0",
                "id": id,
                "result": result
            });

            writeln!(stdout, "{}", response)?;
            stdout.flush()?;
        }

        Ok(())
    }
}

fn main() -> io::Result<()> {
    // Logs go to stderr; stdout carries responses only.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("battle_optimizer=info")),
        )
        .init();

    let args = Args::parse();
    let config = match &args.config {
        Some(path) => OptimizerConfig::load_from_path(path)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e.to_string()))?,
        None => OptimizerConfig::default(),
    };

    tracing::info!("optimizer server listening on stdio");
    OptimizerServer::new(config).run()
}
