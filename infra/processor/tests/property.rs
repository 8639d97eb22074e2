use proptest::prelude::*;
use spost_processor::Processor;

fn declaration() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "color: red",
        "color: #00f",
        "margin: 0",
        "margin: 1px 2em",
        "padding: 2em",
        "display: block",
        "display: flex",
        "opacity: 0.5",
        "user-select: none",
    ])
    .prop_map(str::to_owned)
}

fn rule() -> impl Strategy<Value = String> {
    ("[a-z]{1,6}", prop::collection::vec(declaration(), 1..5))
        .prop_map(|(class, decls)| format!(".{class} {{ {}; }}", decls.join("; ")))
}

fn stylesheet() -> impl Strategy<Value = String> {
    prop::collection::vec(rule(), 1..6).prop_map(|rules| rules.join("\n"))
}

proptest! {
    #[test]
    fn minify_is_idempotent(css in stylesheet()) {
        let processor = Processor::builder()
            .browsers(["> 1%", "last 2 versions", "Firefox ESR", "ie >= 9"])
            .compress(true)
            .build()
            .unwrap();

        let once = processor.process(&css, "prop.css").unwrap();
        let twice = processor.minify(&once, "prop.css").unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prefixing_is_deterministic(css in stylesheet()) {
        let processor = Processor::builder().browsers(["ie >= 9"]).build().unwrap();

        let first = processor.prefix(&css, "prop.css").unwrap();
        let second = processor.prefix(&css, "prop.css").unwrap();
        prop_assert_eq!(first, second);
    }
}
