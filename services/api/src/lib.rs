mod cli;
mod console;
mod evaluate;
mod infra;
mod routes;
mod server;
#[cfg(test)]
mod test_support;

use productivity_coach::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
