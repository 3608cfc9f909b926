// Copyright 2022 Bryant Luk
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Writes an XML document from JSON-lines write instructions.

use clap::Parser;
use iati_xml::cli::{init_logging, run, ReplayConfig};
use tracing::error;

fn main() {
    let config = ReplayConfig::parse();
    init_logging(&config.log_level);

    if let Err(err) = run(&config) {
        error!(error = %err, "replay failed");
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
