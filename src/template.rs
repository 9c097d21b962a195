//! Prompt template for generating compatible exam documents elsewhere.

const SUBJECT_PLACEHOLDER: &str = "[SUBJECT_PLACEHOLDER]";
const DEFAULT_TEMPLATE_SUBJECT: &str = "[Your Topic Here]";
const DEFAULT_FILE_SUBJECT: &str = "Custom";

const PROMPT_TEMPLATE: &str = r#"### Prompt for Generating Compatible Mock Exams

Please generate a mock exam on the topic of **`[SUBJECT_PLACEHOLDER]`**. The exam must be structured in a specific Markdown format to be compatible with my parsing script.

The entire output must be a single block of Markdown text. Please ensure the final output can be saved as a `.md` file.

**Mathematical Notation Support:**
*   The platform supports LaTeX-style mathematical notation.
*   For inline math, use `$...$` (e.g., `$x^2 + y^2 = r^2$`)
*   For display math, use `$$...$$` (e.g., `$$\frac{a}{b} = \frac{c}{d}$$`)
*   Common symbols: `\alpha, \beta, \gamma, \pi, \sigma, \sum, \int, \frac{a}{b}, \sqrt{x}, x^2, x_1`

**Formatting Rules:**

1.  **Main Title:** The exam must begin with a level 1 heading for the title, like `# [SUBJECT_PLACEHOLDER] Mock Exam`.

2.  **Question Sections:**
    *   The exam should have exactly 3 sections: Section A, Section B, and Section C.
    *   Each section header must be a level 2 heading with point values, like `## Section A: Multiple Choice (20 Marks)`.
    *   Each section must contain exactly 5 questions.
    *   **ALL questions must be multiple choice with exactly 4 options (a, b, c, d).**
    *   Each question must be numbered (e.g., `1.`, `2.`, `3.`, `4.`, `5.`).
    *   Multiple-choice options must be on new lines, starting with a letter and parenthesis followed by a space (e.g., `a) Option text`, `b) Option text`).
    *   **Use mathematical notation where appropriate** (e.g., `What is the value of $x$ in $2x + 3 = 7$?`)
    *   Never use three consecutive hyphens inside a question, option or explanation.

3.  **Answer Separator:**
    *   After all the questions and before the answers, there **must** be a `---` horizontal rule on its own line.

4.  **Answers and Explanations:**
    *   After the separator, there must be a level 1 heading for the answers: `# Answers`.
    *   The answers should be organized in sections matching the question sections (e.g., `## Section A`, `## Section B`, `## Section C`).
    *   Each answer **must** be on a single line and follow this exact format:
        `[Question Number].  [Correct Option Letter]) [Answer Text] || **Explanation:** [Detailed explanation of why this answer is correct]`
    *   **Include mathematical notation in explanations** where relevant.

**Crucial Formatting Details:**

*   The `||` separator between the answer and the explanation is essential for the script to work.
*   The explanation must begin with `**Explanation:**` (including the bold markdown).
*   Each answer must start with the question number, followed by the correct option letter and closing parenthesis.
*   Ensure each section has exactly 5 questions and 5 corresponding answers.

### Example of the Required Format:

```markdown
# Arithmetic Mock Exam

## Section A: Multiple Choice (20 Marks)

1.  What is $2 + 2$?
    a) $3$
    b) $4$
    c) $5$
    d) $22$

2.  What is $\sqrt{25}$?
    a) $3$
    b) $4$
    c) $5$
    d) $6$

---

# Answers

## Section A
1.  b) $4$ || **Explanation:** Adding two and two gives four.
2.  c) $5$ || **Explanation:** $\sqrt{25} = 5$ because $5^2 = 25$.
```

**Instructions for Use:**
1. Copy this entire prompt
2. Paste into any AI assistant
3. Save the generated exam as a .md file
4. Run it with `mock-exam take <file>` or `mock-exam import`
"#;

/// The prompt template with every placeholder replaced by `subject`.
///
/// A blank subject falls back to a visible placeholder the user can edit.
pub fn prompt(subject: Option<&str>) -> String {
    let subject = non_blank(subject).unwrap_or(DEFAULT_TEMPLATE_SUBJECT);
    PROMPT_TEMPLATE.replace(SUBJECT_PLACEHOLDER, subject)
}

/// File name an imported document is saved under, e.g. `linear_algebra_exam.md`.
pub fn export_file_name(subject: Option<&str>) -> String {
    let subject = non_blank(subject).unwrap_or(DEFAULT_FILE_SUBJECT);
    let stem: String = subject
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect();
    format!("{stem}_exam.md")
}

fn non_blank(subject: Option<&str>) -> Option<&str> {
    subject.map(str::trim).filter(|s| !s.is_empty())
}
