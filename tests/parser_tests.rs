#[cfg(test)]
mod tests {
    use caption_recipes::normalizer::normalize_caption;
    use caption_recipes::{parse_recipe_text, Confidence};

    #[test]
    fn test_labeled_multi_line_caption() {
        // Scenario A: explicit headers, one ingredient and one step per line.
        let caption = "Ingredients:\n1 cup flour\n2 eggs\nInstructions:\n1. Mix flour and eggs.\n2. Bake at 350F for 20 minutes.";
        let result = parse_recipe_text(caption);

        assert_eq!(result.ingredients, vec!["1 cup flour", "2 eggs"]);
        assert_eq!(
            result.steps,
            vec!["Mix flour and eggs.", "Bake at 350F for 20 minutes."]
        );
        assert!(result.confidence >= Confidence::Medium);
    }

    #[test]
    fn test_run_on_ingredient_paragraph() {
        // Scenario B: one paragraph, three ingredients, prep clauses stay
        // attached to the ingredient they describe.
        let caption = "1 lb shrimp, peeled and deveined, 2 cloves garlic, minced, 1 tsp salt";
        let result = parse_recipe_text(caption);

        assert_eq!(result.ingredients.len(), 3);
        assert_eq!(result.ingredients[0], "1 lb shrimp, peeled and deveined");
        assert_eq!(result.ingredients[1], "2 cloves garlic, minced");
        assert_eq!(result.ingredients[2], "1 tsp salt");
    }

    #[test]
    fn test_orphaned_number_reassembled() {
        // Scenario C: a quantity split across lines by the retrieval step.
        let caption = "Ingredients:\n1\n1/2 cup sugar";
        let result = parse_recipe_text(caption);
        assert_eq!(result.ingredients, vec!["1 1/2 cup sugar"]);
    }

    #[test]
    fn test_social_metadata_never_surfaces() {
        // Scenario D: the likes/comments line is neither a title nor an
        // ingredient.
        let caption = "1,204 likes, 88 comments - chef_jane on May 2:\nGarlic Butter Shrimp\n1 lb shrimp\n2 tbsp butter\nCook the shrimp in the butter.";
        let result = parse_recipe_text(caption);

        for ingredient in &result.ingredients {
            assert!(
                !ingredient.contains("likes"),
                "metadata leaked into ingredients: {:?}",
                ingredient
            );
        }
        for step in &result.steps {
            assert!(!step.contains("likes"), "metadata leaked into steps: {:?}", step);
        }
    }

    #[test]
    fn test_inline_numbered_single_line() {
        // Scenario E: numbering appears mid-text on a single line.
        let caption = "Instructions:\n1. Preheat oven. 2. Mix batter. 3. Bake 25 minutes.";
        let result = parse_recipe_text(caption);
        assert_eq!(
            result.steps,
            vec!["Preheat oven.", "Mix batter.", "Bake 25 minutes."]
        );
    }

    #[test]
    fn test_headerless_free_form_caption() {
        // Scenario F: no headers at all; quantity-shaped lines become
        // ingredients, imperative sentences are recovered as steps.
        let caption = "2 cups flour\n1 tsp cinnamon\n3 eggs\nMix everything in a bowl.\nBake for 30 minutes until golden.";
        let result = parse_recipe_text(caption);

        assert!(!result.ingredients.is_empty());
        assert!(!result.steps.is_empty());
        assert!(result.confidence <= Confidence::Medium);
    }

    #[test]
    fn test_normalization_idempotence() {
        let samples = [
            "898 likes, 11 comments\r\nBest\u{00A0}Cake &amp; more&#8203;\n\n\n\n#cake",
            "Ingredients:\\n1 cup flour\\n2 eggs",
            "a 9\u{00D7}13 pan &amp;amp; a spoon",
            "",
        ];
        for s in samples {
            let once = normalize_caption(s);
            assert_eq!(normalize_caption(&once), once, "not idempotent for {:?}", s);
        }
    }

    #[test]
    fn test_sections_flatten_to_flat_list() {
        let caption = "Ingredients:\n2 cups flour\n1 tsp salt\nFor the ganache:\n1 cup cream\n8 oz chocolate\nFrosting:\n1 cup powdered sugar";
        let result = parse_recipe_text(caption);

        let sections = result.ingredient_sections.expect("headers should create sections");
        let flattened: Vec<String> = sections
            .iter()
            .flat_map(|s| s.ingredients.iter().cloned())
            .collect();
        assert_eq!(flattened, result.ingredients);
        assert!(sections.iter().any(|s| s.name.as_deref() == Some("For the ganache")));
    }

    #[test]
    fn test_determinism() {
        let caption = "Ingredients:\n1 cup flour, 2 eggs; salt to taste\nMethod:\nMix well. Then bake.";
        let first = parse_recipe_text(caption);
        let second = parse_recipe_text(caption);
        assert_eq!(first, second);
    }

    #[test]
    fn test_no_invented_alphanumeric_content() {
        let caption = "Ingredients:\n2 cups flour\n1 tsp salt\nInstructions:\n1. Mix well.\n2. Bake at 350F.";
        let result = parse_recipe_text(caption);

        let flat_input: String = caption.chars().filter(|c| c.is_alphanumeric()).collect();
        for line in result.ingredients.iter().chain(result.steps.iter()) {
            let content: String = line.chars().filter(|c| c.is_alphanumeric()).collect();
            assert!(
                flat_input.contains(&content),
                "invented content in {:?}",
                line
            );
        }
    }

    #[test]
    fn test_salt_and_pepper_idiom_survives() {
        let caption = "Ingredients:\n1 lb chicken\nsalt and pepper to taste\nInstructions:\nSeason the chicken and roast it.";
        let result = parse_recipe_text(caption);
        assert!(result
            .ingredients
            .iter()
            .any(|i| i.eq_ignore_ascii_case("salt and pepper to taste")));
    }

    #[test]
    fn test_hashtag_tail_excluded() {
        let caption = "Ingredients:\n2 cups flour\n1 cup sugar\n#baking #cake #easy #homemade";
        let result = parse_recipe_text(caption);
        assert_eq!(result.ingredients, vec!["2 cups flour", "1 cup sugar"]);
    }

    #[test]
    fn test_confidence_tiers() {
        // High: five ingredients and three steps.
        let high = parse_recipe_text(
            "Ingredients:\n1 cup flour\n2 eggs\n1 tsp salt\n1 cup sugar\n1 stick butter\nInstructions:\n1. Mix the dry mix.\n2. Whisk the eggs.\n3. Bake until done.",
        );
        assert_eq!(high.confidence, Confidence::High);

        // Low: nothing recoverable.
        let low = parse_recipe_text("what a lovely day");
        assert_eq!(low.confidence, Confidence::Low);
    }

    #[test]
    fn test_unicode_fraction_glyphs_accepted() {
        let result = parse_recipe_text("Ingredients:\n½ cup sugar\n⅓ cup cocoa");
        assert_eq!(result.ingredients, vec!["½ cup sugar", "⅓ cup cocoa"]);
    }

    #[test]
    fn test_empty_and_pathological_inputs() {
        for input in ["", "   ", "\n\n\n", "((((", "&&&&", "\u{200B}\u{200C}"] {
            let result = parse_recipe_text(input);
            assert_eq!(result.confidence, Confidence::Low);
        }
    }
}
