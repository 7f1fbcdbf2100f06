use criterion::{black_box, criterion_group, criterion_main, Criterion};

use trivia_core::model::{Answer, OpenEndedOptions, Question};
use trivia_core::session::QuizSession;

fn bench_grade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grade");

    let choice = Question::multiple_choice(1, "Pick", ["a", "b", "c", "d"], "c").unwrap();
    let choice_answer = Answer::from("c");

    let alternatives: Vec<String> = (0..32).map(|i| format!("option {i}")).collect();
    let correct: Vec<String> = alternatives.iter().step_by(2).cloned().collect();
    let multi = Question::multiple_answer(2, "Pick many", alternatives, correct.clone()).unwrap();
    let multi_answer = Answer::selection(correct.into_iter().rev());

    let open = Question::open_ended(3, "Name it", "Gradle", OpenEndedOptions::default()).unwrap();
    let open_answer = Answer::from("I am fairly sure the answer is GRADLE, right?");

    let mismatch = Answer::Boolean(true);

    group.bench_function("multiple_choice", |b| {
        b.iter(|| black_box(&choice).grade(black_box(&choice_answer)))
    });

    group.bench_function("multiple_answer_16_of_32", |b| {
        b.iter(|| black_box(&multi).grade(black_box(&multi_answer)))
    });

    group.bench_function("open_ended_substring", |b| {
        b.iter(|| black_box(&open).grade(black_box(&open_answer)))
    });

    group.bench_function("shape_mismatch", |b| {
        b.iter(|| black_box(&open).grade(black_box(&mismatch)))
    });

    group.finish();
}

fn bench_session_run(c: &mut Criterion) {
    let questions: Vec<Question> = (1..=100)
        .map(|id| Question::true_false(id, format!("Statement {id}"), id % 2 == 0).unwrap())
        .collect();

    c.bench_function("session_run_100", |b| {
        b.iter(|| {
            let mut session = QuizSession::new();
            session.load(questions.clone()).unwrap();
            for id in 1..=100u32 {
                session.submit_answer(id, Answer::Boolean(true)).unwrap();
                session.advance().unwrap();
            }
            black_box(session.score())
        })
    });
}

criterion_group!(benches, bench_grade, bench_session_run);
criterion_main!(benches);
