//! Implementation of the `conjure encode` command.

use super::load_chain;
use crate::chain::encode_chain;
use crate::cli::EncodeArgs;
use crate::error::Result;

/// Print the chain rooted at the source document as an inherit blob.
pub fn cmd_encode(args: EncodeArgs) -> Result<()> {
    let (_, chain) = load_chain(&args.source)?;
    println!("{}", encode_chain(&chain)?);
    Ok(())
}
