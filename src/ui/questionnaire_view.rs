//! Questionnaire screen: age plus eight yes/no/unsure questions.

use crate::app::Message;
use crate::ui::{self, components};
use iced::widget::{button, column, container, row, text, text_input};
use iced::{Color, Element, Fill, Theme};
use mole_scan::domain::{Answer, Question, Questionnaire};

pub fn view(questionnaire: &Questionnaire) -> Element<'_, Message> {
    let age = column![
        text("Age").size(16).color(ui::BODY),
        text_input("Enter your age", questionnaire.age())
            .on_input(Message::AgeChanged)
            .padding(12)
            .size(16),
    ]
    .spacing(8);

    let questions = Question::ALL
        .iter()
        .fold(column![].spacing(20), |col, question| {
            col.push(question_row(*question, questionnaire.answer(*question)))
        });

    let card = components::card_container(
        column![
            age,
            questions,
            components::primary_button("Next", Some(Message::QuestionnaireDone)),
        ]
        .spacing(24),
        Color::WHITE,
        Color::from_rgb(0.89, 0.91, 0.94),
    );

    column![
        container(ui::title_text("Questionnaire")).center_x(Fill),
        card
    ]
    .spacing(30)
    .into()
}

fn question_row<'a>(question: Question, selected: Answer) -> Element<'a, Message> {
    let choices = Answer::ALL.iter().fold(row![].spacing(8), |choices, answer| {
        let style: fn(&Theme, button::Status) -> button::Style = if *answer == selected {
            button::primary
        } else {
            button::secondary
        };
        choices.push(
            button(text(answer.label()).size(14))
                .on_press(Message::AnswerSelected(question, *answer))
                .padding(12)
                .width(Fill)
                .style(style),
        )
    });

    column![text(question.prompt()).size(16).color(ui::BODY), choices]
        .spacing(12)
        .into()
}
