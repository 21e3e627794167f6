use anyhow::Result;
use colored::Colorize;

use crate::cli::GlobalIdAction;
use crate::global_id::{decode_global_id, encode_global_id};

pub fn handle_global_id(action: GlobalIdAction) -> Result<()> {
    match action {
        GlobalIdAction::Encode { type_name, id } => {
            println!("{}", encode_global_id(&type_name, &id));
        }
        GlobalIdAction::Decode { global_id } => {
            let gid = decode_global_id(&global_id)?;
            println!("Type: {}", gid.type_name.blue());
            println!("ID:   {}", gid.id.cyan());
        }
    }
    Ok(())
}
