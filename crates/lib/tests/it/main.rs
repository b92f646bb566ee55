/*! Integration tests for Datamap.
 *
 * This test suite is organized as a single integration test binary
 * following the pattern described by matklad in
 * https://matklad.github.io/2021/02/27/delete-cargo-integration-tests.html
 *
 * The module structure mirrors the main library structure:
 * - assign: Tests for writing values into destination records by dotted path
 * - convert: Tests for Converter construction and end-to-end parsing
 * - extract: Tests for the single-value extraction entry points
 * - rules: Tests for loading, serializing and validating rule sets
 * - source: Tests for input classification and normalization
 */

use tracing_subscriber::EnvFilter;

#[ctor::ctor]
fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("datamap=info".parse().unwrap()),
        )
        .with_test_writer()
        .try_init();
}

mod assign;
mod extract;
mod helpers;
mod rules;
mod source;
