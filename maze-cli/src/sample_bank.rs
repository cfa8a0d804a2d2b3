use maze_core::{InMemoryQuestionBank, Question, QuestionBankError};

const MULTIPLE_CHOICE: [(&str, &str, [&str; 3]); 10] = [
    (
        "Which actress played the lead role in the movie 'The Hunger Games'?",
        "Jennifer Lawrence",
        ["Jennifer Aniston", "Jennifer Garner", "Jennifer Lawrence"],
    ),
    (
        "Who is the main antagonist in 'The Lion King'?",
        "Scar",
        ["Scar", "Simba", "Rafiki"],
    ),
    (
        "In which country would you find the Great Wall?",
        "China",
        ["China", "United States", "India"],
    ),
    (
        "In which city is the famous Taj Mahal located?",
        "Agra, India",
        ["Agra, India", "Beijing, China", "Cairo, Egypt"],
    ),
    (
        "What is the capital city of Australia?",
        "Canberra",
        ["Sydney", "Melbourne", "Canberra"],
    ),
    (
        "What's the smallest country in the world?",
        "Vatican City",
        ["Monaco", "Vatican City", "Luxembourg"],
    ),
    (
        "What is the largest animal on Earth?",
        "Blue whale",
        ["Blue whale", "Elephant", "Giraffe"],
    ),
    (
        "What is the first element on the periodic table?",
        "Hydrogen",
        ["Hydrogen", "Oxygen", "Carbon"],
    ),
    (
        "Which famous scientist developed the theory of relativity?",
        "Albert Einstein",
        ["Isaac Newton", "Albert Einstein", "Galileo Galilei"],
    ),
    (
        "Who is the founder of Microsoft?",
        "Bill Gates",
        ["Bill Gates", "Steve Jobs", "Mark Zuckerberg"],
    ),
];

const TRUE_FALSE: [(&str, bool); 10] = [
    ("A chicken can live without a head long after it is chopped off.", true),
    ("Bananas are berries.", true),
    ("You can sneeze while asleep.", false),
    ("Google was initially called BackRub.", true),
    ("The Titanic sank on its maiden voyage.", true),
    ("A group of crows is called a 'murder'.", true),
    ("The Big Apple is a nickname given to Washington D.C in 1971.", false),
    ("Mars is known as the 'Red Planet' due to its blue skies.", false),
    ("A kilogram of lead is heavier than a kilogram of feathers.", false),
    ("Leonardo da Vinci painted the Sistine Chapel ceiling.", false),
];

const SHORT_ANSWER: [(&str, &str); 9] = [
    ("What is the largest mammal in the world?", "Blue whale"),
    ("What is the name of the largest ocean on Earth?", "Pacific Ocean"),
    ("In the story of Snow White, how many dwarfs are there?", "Seven"),
    ("Who is the king of the gods in Greek mythology?", "Zeus"),
    ("What do bees collect to make honey?", "Nectar"),
    ("How many wives did King Henry VIII have?", "Six"),
    (
        "In mathematics, what is the name for a number that is not a prime number and has more than two factors?",
        "Composite Number",
    ),
    ("Who is the Greek god of war and son of Zeus and Hera?", "Ares"),
    ("What is the chemical symbol for the element mercury?", "Hg"),
];

/// The trivia bank used when no `--questions` file is given.
pub fn sample_bank() -> Result<InMemoryQuestionBank, QuestionBankError> {
    let mut bank = InMemoryQuestionBank::default();

    for (text, answer, choices) in MULTIPLE_CHOICE {
        let choices = choices.iter().map(|choice| choice.to_string()).collect();
        bank.push(Question::multiple_choice(text, answer, choices)?);
    }

    for (text, answer) in TRUE_FALSE {
        bank.push(Question::true_false(text, answer)?);
    }

    for (text, answer) in SHORT_ANSWER {
        bank.push(Question::short_answer(text, answer)?);
    }

    Ok(bank)
}
