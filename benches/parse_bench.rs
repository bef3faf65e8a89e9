use criterion::{black_box, criterion_group, criterion_main, Criterion};
use sexpr_notation::{Lexer, Lexicon, Parser, SExpr, SExprLexer, SExprParser, Scanner, TokenType, Value};

fn atoms() -> Lexicon {
    Lexicon::new(vec![
        TokenType::pattern("identifier", "[A-Za-z_][A-Za-z_0-9]*")
            .unwrap()
            .with_mapper(TokenType::verbatim)
            .unwrap(),
        TokenType::pattern("text", "\"[^\"]*\"")
            .unwrap()
            .with_mapper(TokenType::verbatim)
            .unwrap(),
        TokenType::pattern("number", "[0-9]+")
            .unwrap()
            .with_mapper(|token| Ok(Value::Int(token.text().parse().unwrap_or_default())))
            .unwrap(),
    ])
}

fn document(sections: usize) -> String {
    let body: Vec<String> = (0..sections)
        .map(|i| format!("((p) \"paragraph {}\" ((br)) (count {} {}))", i, i, i * 7))
        .collect();
    format!("((html) ((body) {}))", body.join("\n  "))
}

fn lexer_benchmark(c: &mut Criterion) {
    let source = document(100);
    let lexicon = Lexicon::from_shared(SExprLexer::new(&atoms()).token_types().to_vec());

    c.bench_function("tokenize document", |b| {
        b.iter(|| {
            let mut scanner = Scanner::new(lexicon.clone());
            scanner.scan_tokens(black_box(&source)).unwrap()
        })
    });
}

fn parser_benchmark(c: &mut Criterion) {
    let small = document(1);
    let large = document(100);
    let parser: SExprParser = SExprParser::new(atoms());

    c.bench_function("parse small document", |b| {
        b.iter(|| -> SExpr { parser.parse(black_box(&small)).unwrap() })
    });

    c.bench_function("parse large document", |b| {
        b.iter(|| -> SExpr { parser.parse(black_box(&large)).unwrap() })
    });

    let nested = format!("{}{}", "(".repeat(200), ")".repeat(200));
    c.bench_function("parse nested lists", |b| {
        b.iter(|| -> SExpr { parser.parse(black_box(&nested)).unwrap() })
    });
}

criterion_group!(benches, lexer_benchmark, parser_benchmark);
criterion_main!(benches);
