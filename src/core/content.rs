//! Compiled-in catalog data.

use super::catalog::{Question, Resource, Subject, Topic};

fn topic(name: &str, description: &str, examples: &[&str]) -> Topic {
    Topic {
        name: name.to_string(),
        description: description.to_string(),
        examples: examples.iter().map(|e| e.to_string()).collect(),
    }
}

fn links(items: &[(&str, &str)]) -> Vec<Resource> {
    items
        .iter()
        .map(|(name, url)| Resource {
            display_name: name.to_string(),
            url: url.to_string(),
        })
        .collect()
}

/// Resource-only subject (no topics, no quiz).
fn library(name: &str, items: &[(&str, &str)]) -> Subject {
    Subject {
        name: name.to_string(),
        topics: Vec::new(),
        resources: links(items),
        quiz: Vec::new(),
    }
}

pub fn subjects() -> Vec<Subject> {
    vec![
        mathematics(),
        science(),
        programming(),
        library(
            "Geography",
            &[
                ("TIE Geography Books", "https://ol.tie.go.tz/subjects/geography"),
                ("NECTA Geography Past Papers", "https://www.necta.go.tz"),
                (
                    "YouTube: Tanzania Geography Lessons",
                    "https://www.youtube.com/results?search_query=tanzania+geography+lessons",
                ),
            ],
        ),
        library(
            "Kiswahili",
            &[
                ("TIE Kiswahili Books", "https://ol.tie.go.tz/subjects/kiswahili"),
                ("NECTA Kiswahili Papers", "https://www.necta.go.tz"),
                (
                    "YouTube: Mashairi ya Kiswahili",
                    "https://www.youtube.com/results?search_query=shairi+za+kiswahili",
                ),
            ],
        ),
        library(
            "Civics",
            &[
                ("TIE Civics Books", "https://ol.tie.go.tz/subjects/civics"),
                ("NECTA Civics Past Papers", "https://www.necta.go.tz"),
                (
                    "YouTube Civics Lessons",
                    "https://www.youtube.com/results?search_query=civics+tanzania+lessons",
                ),
            ],
        ),
        library(
            "History",
            &[
                ("TIE History Books", "https://ol.tie.go.tz/subjects/history"),
                ("NECTA History Past Papers", "https://www.necta.go.tz"),
                (
                    "YouTube: Tanzania History Lessons",
                    "https://www.youtube.com/results?search_query=history+tanzania+lessons",
                ),
            ],
        ),
        library(
            "English",
            &[
                (
                    "British Council Learn English",
                    "https://learnenglish.britishcouncil.org/",
                ),
                ("NECTA English Past Papers", "https://www.necta.go.tz"),
                (
                    "YouTube English Lessons",
                    "https://www.youtube.com/results?search_query=english+tanzania+lessons",
                ),
            ],
        ),
    ]
}

fn mathematics() -> Subject {
    Subject {
        name: "Mathematics".to_string(),
        topics: vec![
            topic(
                "Algebra",
                "Algebra is the study of mathematical symbols and rules for manipulating these \
                 symbols. It's a unifying thread of almost all of mathematics.",
                &[
                    "Solve for x: 2x + 5 = 11 → x = 3",
                    "Quadratic formula: x = [-b ± √(b² - 4ac)] / 2a",
                    "Linear equation: y = mx + b",
                ],
            ),
            topic(
                "Geometry",
                "Geometry is a branch of mathematics concerned with questions of shape, size, \
                 relative position of figures, and properties of space.",
                &[
                    "Area of a circle = πr²",
                    "Pythagorean theorem: a² + b² = c²",
                    "Volume of a sphere = (4/3)πr³",
                ],
            ),
            topic(
                "Calculus",
                "Calculus is the mathematical study of continuous change, in the same way that \
                 geometry is the study of shape and algebra is the study of generalizations of \
                 arithmetic operations.",
                &[
                    "Derivative of x² is 2x",
                    "Integral of 2x is x² + C",
                    "Fundamental Theorem of Calculus",
                ],
            ),
        ],
        resources: links(&[
            ("Khan Academy Math", "https://www.khanacademy.org/math"),
            ("Math is Fun", "https://www.mathsisfun.com/"),
            ("Wolfram MathWorld", "https://mathworld.wolfram.com/"),
            ("NECTA Past Papers (Math)", "https://www.necta.go.tz"),
            ("TIE Math Textbooks", "https://ol.tie.go.tz/subjects/mathematics"),
        ]),
        quiz: vec![
            Question::trusted(
                "What is the value of π (pi) approximately?",
                &["3.14", "2.71", "1.62", "4.13"],
                "3.14",
            ),
            Question::trusted("What is the derivative of x²?", &["2x", "x²", "2", "x"], "2x"),
            Question::trusted(
                "What is the Pythagorean theorem?",
                &["a² + b² = c²", "E = mc²", "F = ma", "V = IR"],
                "a² + b² = c²",
            ),
        ],
    }
}

fn science() -> Subject {
    Subject {
        name: "Science".to_string(),
        topics: vec![
            topic(
                "Physics",
                "Physics is the natural science that studies matter, its motion and behavior \
                 through space and time, and the related entities of energy and force.",
                &[
                    "Newton's Second Law: F = ma",
                    "Law of Gravitation: F = G(m₁m₂)/r²",
                    "Einstein's E = mc²",
                ],
            ),
            topic(
                "Chemistry",
                "Chemistry is the scientific discipline involved with elements and compounds \
                 composed of atoms, molecules and ions: their composition, structure, \
                 properties, behavior and the changes they undergo during a reaction with other \
                 substances.",
                &[
                    "Water chemical formula: H₂O",
                    "Periodic Table of Elements",
                    "Chemical reaction: 2H₂ + O₂ → 2H₂O",
                ],
            ),
            topic(
                "Biology",
                "Biology is the natural science that studies life and living organisms, \
                 including their physical structure, chemical processes, molecular interactions, \
                 physiological mechanisms, development and evolution.",
                &[
                    "Mitosis: Process of cell division",
                    "DNA structure: Double helix",
                    "Photosynthesis: 6CO₂ + 6H₂O → C₆H₁₂O₆ + 6O₂",
                ],
            ),
        ],
        resources: links(&[
            ("Khan Academy Science", "https://www.khanacademy.org/science"),
            ("PhET Simulations", "https://phet.colorado.edu/"),
            ("NASA STEM Engagement", "https://www.nasa.gov/stem"),
            ("NECTA Past Papers (Science)", "https://www.necta.go.tz"),
            ("TIE Science Books", "https://ol.tie.go.tz/subjects/science"),
        ]),
        quiz: vec![
            Question::trusted(
                "What is the chemical formula for water?",
                &["H₂O", "CO₂", "NaCl", "O₂"],
                "H₂O",
            ),
            Question::trusted(
                "What is Newton's Second Law?",
                &["F = ma", "E = mc²", "PV = nRT", "V = IR"],
                "F = ma",
            ),
            Question::trusted(
                "What is the powerhouse of the cell?",
                &["Mitochondria", "Nucleus", "Ribosome", "Golgi Apparatus"],
                "Mitochondria",
            ),
        ],
    }
}

fn programming() -> Subject {
    Subject {
        name: "Programming".to_string(),
        topics: vec![
            topic(
                "Python",
                "Python is an interpreted, high-level, general-purpose programming language. \
                 Created by Guido van Rossum and first released in 1991, Python's design \
                 philosophy emphasizes code readability with its notable use of significant \
                 whitespace.",
                &[
                    "for i in range(5):\n    print('Hello, World!')",
                    "def factorial(n):\n    return 1 if n == 0 else n * factorial(n-1)",
                    "numbers = [1, 2, 3, 4, 5]\nsquares = [x**2 for x in numbers]",
                ],
            ),
            topic(
                "Data Structures",
                "Data structures are specialized formats for organizing, processing, retrieving \
                 and storing data. There are several basic and advanced types of data \
                 structures, all designed to arrange data to suit a specific purpose.",
                &[
                    "Stack follows LIFO (Last-In-First-Out) principle",
                    "Queue follows FIFO (First-In-First-Out) principle",
                    "Binary Search Tree: left child < parent < right child",
                ],
            ),
            topic(
                "Algorithms",
                "An algorithm is a step-by-step procedure to solve a problem or accomplish some \
                 end. There are many types of algorithms including sorting, searching, graph \
                 algorithms, and more.",
                &[
                    "Binary Search algorithm has O(log n) time complexity",
                    "Bubble Sort: repeatedly swapping adjacent elements",
                    "Dijkstra's algorithm for shortest path finding",
                ],
            ),
        ],
        resources: links(&[
            ("Codecademy", "https://www.codecademy.com/"),
            ("freeCodeCamp", "https://www.freecodecamp.org/"),
            ("W3Schools Python", "https://www.w3schools.com/python/"),
        ]),
        quiz: vec![
            Question::trusted(
                "Which keyword is used to define a function in Python?",
                &["def", "function", "define", "func"],
                "def",
            ),
            Question::trusted(
                "Which data structure uses LIFO?",
                &["Stack", "Queue", "Array", "Linked List"],
                "Stack",
            ),
            Question::trusted(
                "What does OOP stand for?",
                &[
                    "Object-Oriented Programming",
                    "Object-Option Programming",
                    "Objective-Oriented Protocol",
                    "Object-Ordered Programming",
                ],
                "Object-Oriented Programming",
            ),
        ],
    }
}
