//! # Vocabulary Module
//!
//! Word lists and compiled regex patterns shared by the parsing pipelines.
//! The lists are plain const tables so they can be edited without touching
//! control flow; the regexes are compiled once via `lazy_static`.

use lazy_static::lazy_static;
use regex::Regex;

/// Unicode vulgar fraction glyphs accepted as quantity tokens.
pub const VULGAR_FRACTIONS: &str = "½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞";

/// A quantity token: integer, decimal, range, mixed number, N/M fraction,
/// or a vulgar fraction glyph.
pub const QUANTITY_TOKEN: &str = r"(?:\d+\s+\d+/\d+|\d+/\d+|\d+(?:\.\d+)?(?:\s*(?:-|to)\s*\d+(?:\.\d+)?)?|[½⅓⅔¼¾⅕⅖⅗⅘⅙⅚⅛⅜⅝⅞])";

/// Measurement unit words recognized in ingredient lines.
pub const UNIT_WORDS: &[&str] = &[
    // Volume
    "cup", "cups", "teaspoon", "teaspoons", "tsp", "tablespoon", "tablespoons",
    "tbsp", "tbs", "pint", "pints", "quart", "quarts", "qt", "gallon", "gallons",
    "gal", "ml", "milliliter", "milliliters", "millilitre", "millilitres",
    "liter", "liters", "litre", "litres", "cl", "dl",
    // Weight
    "oz", "ounce", "ounces", "lb", "lbs", "pound", "pounds", "mg", "g", "gram",
    "grams", "kg", "kilogram", "kilograms",
    // Count and container
    "stick", "sticks", "clove", "cloves", "can", "cans", "jar", "jars",
    "packet", "packets", "pkg", "package", "packages", "bag", "bags", "box",
    "boxes", "slice", "slices", "pinch", "pinches", "dash", "dashes", "drop",
    "drops", "piece", "pieces", "handful", "handfuls", "sprig", "sprigs",
    "stalk", "stalks", "bunch", "bunches", "head", "heads", "sheet", "sheets",
    "bar", "bars", "cube", "cubes", "knob", "splash", "fillet", "fillets",
];

/// Imperative cooking verbs used to recognize instruction-shaped lines and
/// to locate split points inside long sentences.
pub const COOKING_VERBS: &[&str] = &[
    "preheat", "mix", "stir", "whisk", "combine", "add", "pour", "fold",
    "knead", "beat", "blend", "bake", "boil", "simmer", "saute", "sauté",
    "fry", "grill", "roast", "broil", "toast", "steam", "sear", "chop",
    "dice", "slice", "mince", "grate", "shred", "peel", "season", "marinate",
    "drain", "rinse", "strain", "serve", "garnish", "cook", "heat", "melt",
    "cool", "chill", "refrigerate", "freeze", "transfer", "spread",
    "sprinkle", "drizzle", "layer", "toss", "coat", "cover", "remove",
    "flip", "mash", "grease", "repeat", "divide", "top", "assemble",
];

/// Promotional / call-to-action vocabulary. Lines matching any of these are
/// never ingredients or steps, and titles containing them are penalized.
pub const PROMO_PHRASES: &[&str] = &[
    "follow me", "follow for", "follow @", "link in bio", "link in my bio",
    "use code", "promo code", "discount", "subscribe", "giveaway",
    "tag a friend", "tag someone", "dm me", "check out my", "shop now",
    "order now", "free shipping", "sponsored", "save this recipe",
    "save this post", "share this", "comment below", "comment the word",
    "turn on notifications", "full recipe on", "recipe on my", "recipe link",
    "on my blog", "download my", "join my", "sign up", "limited time",
    "new video", "youtube channel", "hit the bell", "double tap",
];

/// Short ingredient nouns accepted without a quantity when the line is
/// otherwise ingredient-shaped ("sea salt", "fresh basil").
pub const LOOSE_INGREDIENT_NOUNS: &[&str] = &[
    "salt", "pepper", "butter", "sugar", "flour", "garlic", "onion", "onions",
    "egg", "eggs", "milk", "cream", "cheese", "oil", "vanilla", "cinnamon",
    "nutmeg", "basil", "oregano", "thyme", "rosemary", "parsley", "cilantro",
    "lemon", "lime", "honey", "chicken", "beef", "pork", "shrimp", "salmon",
    "tofu", "rice", "pasta", "noodles", "water", "broth", "stock", "yeast",
    "baking powder", "baking soda", "cocoa", "chocolate", "ginger", "paprika",
    "cumin", "turmeric", "soy sauce", "vinegar", "mustard", "breadcrumbs",
    "cornstarch", "zucchini", "carrot", "celery", "potato", "tomato",
    "spinach", "mushroom", "avocado", "chives", "scallions",
];

/// Dish nouns used when scoring title candidates.
pub const RECIPE_NOUNS: &[&str] = &[
    "cake", "cookie", "cookies", "bread", "soup", "salad", "pasta", "pizza",
    "curry", "taco", "tacos", "pie", "brownie", "brownies", "pancake",
    "pancakes", "waffle", "waffles", "muffin", "muffins", "stew", "casserole",
    "risotto", "lasagna", "burger", "sandwich", "wrap", "smoothie", "sauce",
    "dip", "chicken", "salmon", "shrimp", "steak", "ramen", "noodles",
    "stir fry", "stir-fry", "bowl", "bars", "cheesecake", "donut", "doughnut",
    "pudding", "mousse", "frittata", "omelette", "quiche", "granola",
    "oatmeal", "toast", "biscuits", "rolls", "dumplings", "meatballs",
    "chili", "enchiladas", "gnocchi", "pesto", "hummus", "falafel", "tart",
    "crumble", "cobbler", "scones", "fudge", "truffles", "tiramisu",
];

/// Sub-section names that open a named ingredient group even without a
/// trailing colon.
pub const SECTION_HEADER_NAMES: &[&str] = &[
    "ganache", "filling", "topping", "toppings", "frosting", "glaze",
    "sauce", "dough", "batter", "crust", "base", "marinade", "dressing",
    "garnish", "icing", "streusel", "assembly", "crumble",
];

/// Preparation clauses that continue the previous ingredient when a split
/// leaves them stranded at the start of a segment.
pub const CONTINUATION_CLAUSES: &[&str] = &[
    "peeled", "deveined", "minced", "chopped", "diced", "sliced", "melted",
    "softened", "divided", "drained", "rinsed", "crushed", "grated",
    "shredded", "cubed", "julienned", "halved", "quartered", "trimmed",
    "beaten", "sifted", "packed", "seeded", "pitted", "thawed", "cooked",
    "at room temperature", "room temperature", "to serve", "for garnish",
];

/// Phrases that commonly lead a new ingredient inside a run-on line.
pub const INGREDIENT_LEAD_PHRASES: &[&str] = &[
    "a pinch of", "a dash of", "a handful of", "a splash of", "a drizzle of",
    "juice of", "zest of", "a few", "a little", "a knob of",
];

/// Tokens that, when they occur late in a candidate title line, mark where
/// the title ends and running text begins.
pub const TITLE_CUTOFF_TOKENS: &[&str] = &[
    "for", "to", "with", "ingredients", "serves", "using", "recipe", "by",
    "made", "via",
];

/// Social platform names (penalized in titles).
pub const PLATFORM_NAMES: &[&str] = &[
    "instagram", "insta", "tiktok", "facebook", "pinterest", "youtube",
    "reel", "reels", "shorts",
];

/// Single-codepoint food emoji recognized when scoring titles.
pub const FOOD_EMOJI: &str = "\u{1F355}\u{1F354}\u{1F35F}\u{1F32D}\u{1F37F}\u{1F953}\u{1F95A}\u{1F373}\u{1F9C7}\u{1F9C8}\u{1F35E}\u{1F950}\u{1F968}\u{1F96F}\u{1F956}\u{1F9C0}\u{1F957}\u{1F959}\u{1F32E}\u{1F32F}\u{1F96A}\u{1F356}\u{1F357}\u{1F969}\u{1F364}\u{1F363}\u{1F371}\u{1F35B}\u{1F35C}\u{1F35D}\u{1F360}\u{1F362}\u{1F359}\u{1F35A}\u{1F358}\u{1F365}\u{1F95F}\u{1F960}\u{1F961}\u{1F366}\u{1F367}\u{1F368}\u{1F369}\u{1F36A}\u{1F382}\u{1F370}\u{1F9C1}\u{1F967}\u{1F36B}\u{1F36C}\u{1F36D}\u{1F36E}\u{1F36F}\u{1F95C}\u{1F330}\u{1F34E}\u{1F34F}\u{1F350}\u{1F34A}\u{1F34B}\u{1F34C}\u{1F349}\u{1F347}\u{1F353}\u{1FAD0}\u{1F348}\u{1F352}\u{1F351}\u{1F96D}\u{1F34D}\u{1F965}\u{1F95D}\u{1F345}\u{1F346}\u{1F951}\u{1F966}\u{1F96C}\u{1F952}\u{1F336}\u{1FAD1}\u{1F33D}\u{1F955}\u{1FAD2}\u{1F9C4}\u{1F9C5}\u{1F954}\u{1F372}\u{1FAD5}\u{1F963}\u{1F958}\u{1F37D}\u{2615}\u{1F375}\u{1F964}\u{1F9CB}\u{1F376}\u{1F37A}\u{1F377}\u{1F942}\u{1F943}\u{1F378}\u{1F379}\u{1F9C9}\u{1F37E}\u{1F60B}\u{1F924}";

/// Maximum ingredients / steps returned by the engine.
pub const MAX_OUTPUT_ITEMS: usize = 60;

/// Bound for multi-pass merge loops (parenthesis balancing).
pub const MAX_GLUE_PASSES: usize = 10;

/// True for emoji and pictographic symbols stripped from line edges and
/// step text.
pub fn is_emoji_char(c: char) -> bool {
    matches!(
        c,
        '\u{1F000}'..='\u{1FAFF}'
            | '\u{2600}'..='\u{27BF}'
            | '\u{2B00}'..='\u{2BFF}'
            | '\u{FE00}'..='\u{FE0F}'
            | '\u{2190}'..='\u{21FF}'
            | '\u{2139}'
            | '\u{3030}'
    )
}

pub(crate) fn word_alternation(words: &[&str]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}

lazy_static! {
    /// A line that starts with a quantity token.
    pub static ref LEADING_QUANTITY_RE: Regex =
        Regex::new(&format!(r"^\s*{}", QUANTITY_TOKEN))
            .expect("leading quantity pattern should be valid");

    /// A line that is nothing but a quantity token.
    pub static ref BARE_QUANTITY_RE: Regex =
        Regex::new(&format!(r"^\s*{}\s*$", QUANTITY_TOKEN))
            .expect("bare quantity pattern should be valid");

    /// Measurement unit anywhere in a line. The second branch catches
    /// abbreviations fused to the number ("500g", "2tbsp") that have no
    /// word boundary of their own.
    pub static ref UNIT_WORD_RE: Regex = Regex::new(&format!(
        r"(?i)(?:\b(?:{})\b|\d\s*(?:g|kg|mg|ml|cl|dl|l|oz|lbs?|tsp|tbsp)\b)",
        word_alternation(UNIT_WORDS)
    ))
    .expect("unit word pattern should be valid");

    /// Vulgar fraction glyph anywhere in a line.
    pub static ref FRACTION_GLYPH_RE: Regex =
        Regex::new(&format!("[{}]", VULGAR_FRACTIONS))
            .expect("fraction glyph pattern should be valid");

    /// "to taste" / "pinch of X" idioms.
    pub static ref TO_TASTE_RE: Regex = Regex::new(r"(?i)\bto\s+taste\b")
        .expect("to-taste pattern should be valid");
    pub static ref PINCH_OF_RE: Regex =
        Regex::new(r"(?i)\b(?:pinch|dash)(?:es)?\s+of\s+\w+")
            .expect("pinch-of pattern should be valid");

    /// Cooking verb anywhere in a line. The suffix group absorbs common
    /// inflections, including doubled consonants ("stirring", "chopped")
    /// and e-drop forms ("baked", "dicing").
    pub static ref COOKING_VERB_RE: Regex = Regex::new(&format!(
        r"(?i)\b(?:{})(?:[a-z]?(?:ed|ing)|e?s|d)?\b",
        word_alternation(COOKING_VERBS)
    ))
    .expect("cooking verb pattern should be valid");

    /// Cooking verb at the start of a line (imperative shape).
    pub static ref LEADING_VERB_RE: Regex = Regex::new(&format!(
        r"(?i)^\s*(?:{})\b",
        word_alternation(COOKING_VERBS)
    ))
    .expect("leading verb pattern should be valid");

    /// Promotional vocabulary.
    pub static ref PROMO_RE: Regex =
        Regex::new(&format!(r"(?i)(?:{})", word_alternation(PROMO_PHRASES)))
            .expect("promo pattern should be valid");

    /// Social metadata lines ("1,204 likes, 88 comments - ...").
    pub static ref SOCIAL_META_RE: Regex = Regex::new(
        r"(?i)^\s*[\d.,]+\s*[km]?\s+likes?\b|(?i)\b[\d.,]+\s*[km]?\s+comments?\b"
    )
    .expect("social metadata pattern should be valid");

    /// Leading social metadata prefix, stripped from title candidates.
    pub static ref LEADING_SOCIAL_META_RE: Regex = Regex::new(
        r"(?i)^\s*[\d.,]+\s*[km]?\s+likes?[^:\n]*(?::|-)?\s*"
    )
    .expect("leading social metadata pattern should be valid");

    /// Loose ingredient noun anywhere in a line.
    pub static ref LOOSE_NOUN_RE: Regex = Regex::new(&format!(
        r"(?i)\b(?:{})\b",
        word_alternation(LOOSE_INGREDIENT_NOUNS)
    ))
    .expect("loose noun pattern should be valid");

    /// Dish noun anywhere in a title candidate.
    pub static ref RECIPE_NOUN_RE: Regex = Regex::new(&format!(
        r"(?i)\b(?:{})\b",
        word_alternation(RECIPE_NOUNS)
    ))
    .expect("recipe noun pattern should be valid");

    /// Platform name anywhere in a title candidate.
    pub static ref PLATFORM_RE: Regex = Regex::new(&format!(
        r"(?i)\b(?:{})\b",
        word_alternation(PLATFORM_NAMES)
    ))
    .expect("platform pattern should be valid");

    /// URLs and social handles/hashtags.
    pub static ref URL_RE: Regex = Regex::new(r"(?i)(?:https?://|www\.)\S+")
        .expect("url pattern should be valid");
    pub static ref HANDLE_RE: Regex = Regex::new(r"[@#][A-Za-z0-9_]")
        .expect("handle pattern should be valid");

    /// Ingredients / steps section headers.
    pub static ref INGREDIENTS_HEADER_RE: Regex = Regex::new(
        r"(?i)\b(?:ingredients?|what you(?:'|’)?ll need|what you need|shopping list)\b\s*[:：\-]?"
    )
    .expect("ingredients header pattern should be valid");
    pub static ref STEPS_HEADER_RE: Regex = Regex::new(
        r"(?i)\b(?:instructions?|directions?|method|preparation|steps?|how to make(?:\s+it)?)\b\s*[:：\-]?"
    )
    .expect("steps header pattern should be valid");

    /// Trailing hashtag blocks and the collapsed "less" marker that end the
    /// useful part of a caption.
    pub static ref HASHTAG_BLOCK_RE: Regex =
        Regex::new(r"(?:#[A-Za-z0-9_]+[ \t]*){2,}|(?m)^[ \t]*#[A-Za-z0-9_]+")
            .expect("hashtag block pattern should be valid");
    pub static ref LESS_MARKER_RE: Regex =
        Regex::new(r"(?mi)^\s*(?:…\s*)?less\s*$")
            .expect("less marker pattern should be valid");

    /// Leading list markers (bullets, numbering) on a line.
    pub static ref LEADING_MARKER_RE: Regex =
        Regex::new(r"^\s*(?:\d{1,2}\s*[.)\]:]|[-•*‣▪◦>»→])\s*")
            .expect("leading marker pattern should be valid");

    /// Serving / yield labels.
    pub static ref SERVINGS_RE: Regex = Regex::new(
        r"(?i)\b(?:serves|servings?|yields?|makes)\s*[:\-]?\s*\d+(?:\s*(?:-|to)\s*\d+)?\b"
    )
    .expect("servings pattern should be valid");

    /// Meta labels rejected from the step list.
    pub static ref META_LABEL_RE: Regex = Regex::new(
        r"(?i)^\s*(?:serves?|servings?|yields?|makes|prep time|cook(?:ing)? time|total time|time|difficulty|calories|kcal)\b\s*[:\d]"
    )
    .expect("meta label pattern should be valid");

    /// Oven / temperature fragments merged back into the previous line.
    pub static ref TEMPERATURE_LINE_RE: Regex = Regex::new(
        r"(?i)^\s*\(?\s*(?:\d{2,3}\s*°?\s*[cf]\b|\d{2,3}\s*degrees\b|oven\s+(?:at|to)\s+\d)"
    )
    .expect("temperature line pattern should be valid");

    /// A line ending in a dangling "warmed/heated to" phrase.
    pub static ref DANGLING_WARMED_RE: Regex =
        Regex::new(r"(?i)\b(?:warmed|heated|cooled|chilled|melted)\s+to\s*$")
            .expect("dangling warmed pattern should be valid");

    /// Continuation clause at the start of a segment.
    pub static ref CONTINUATION_RE: Regex = Regex::new(&format!(
        r"(?i)^(?:and\s+|then\s+)?(?:{})(?:\s+(?:and|&)\s+[a-zà-ÿ]+)?\s*$",
        word_alternation(CONTINUATION_CLAUSES)
    ))
    .expect("continuation clause pattern should be valid");

    /// Mixed number ("1 1/2") protection during run-on splitting.
    pub static ref MIXED_NUMBER_RE: Regex = Regex::new(r"(\d+)\s+(\d+/\d+)")
        .expect("mixed number pattern should be valid");
}
