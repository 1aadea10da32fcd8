// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
// See: https://users.rust-lang.org/t/cargo-rustc-benches-awarnings/110111/2
#[allow(dead_code)]
pub fn generate_questions(count: usize) -> String {
    let base = "Q: What does *ownership* mean for `Vec<T>`?\nA: Every value has a single _owner_, and \\(n\\) elements are dropped:\n- when the owner goes out of scope\n- when it is reassigned\n\n";
    base.repeat(count)
}

#[allow(dead_code)]
pub fn generate_chapters(chapters: usize, sections: usize, questions: usize) -> String {
    let mut content = String::new();

    for chapter in 0..chapters {
        content.push_str(&format!("CHA: Chapter {chapter}\n"));
        for section in 0..sections {
            content.push_str(&format!("SEC: Section {section}\n"));
            content.push_str(&generate_questions(questions));
            content.push_str(&format!("SUB: Details {section}\n"));
            content.push_str(&generate_table(3, 3));
        }
    }

    content
}

#[allow(dead_code)]
fn generate_table(rows: usize, columns: usize) -> String {
    let mut content = String::from("Q: Which values line up?\nA:\n---\n");
    for row in 0..rows {
        for column in 0..columns {
            content.push_str(&format!("|< r{row}c{column} "));
        }
        content.push_str("\n---\n");
    }
    content.push('\n');
    content
}
