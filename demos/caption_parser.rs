//! Demo: parse a scraped caption into a recipe draft and print it as JSON.
//!
//! Run with `cargo run --example caption_parser [caption-file]`; without an
//! argument a built-in sample caption is parsed. RUST_LOG=debug shows the
//! pipeline stages.

use anyhow::Result;
use caption_recipes::{build_recipe_draft, DraftHints};

const SAMPLE_CAPTION: &str = "\
898 likes, 11 comments - home.baker on May 2:
Brown Butter Chocolate Chip Cookies 🍪
Ingredients:
2 1/4 cups flour
1 tsp baking soda
1 cup butter, browned and cooled, 3/4 cup sugar, 2 eggs
2 cups chocolate chips
salt and pepper to taste
Instructions:
1. Cream the butter and sugar. 2. Fold in the dry mix. 3. Bake at 350F for 11 minutes.
#cookies #baking #homemade";

fn main() -> Result<()> {
    env_logger::init();

    let caption = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE_CAPTION.to_string(),
    };

    let draft = build_recipe_draft(&caption, &DraftHints::default());
    println!("{}", serde_json::to_string_pretty(&draft)?);
    Ok(())
}
