//! Definitions related to tokenizers.

use crate::source::InputSpan;
use crate::tokens::kind::TokenKind;
use crate::tokens::token::Token;
use log::{debug, error, trace};
use regex::{Regex, RegexBuilder};
use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::marker::PhantomData;

/// State stack change applied after a rule matches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Transition<S> {
    None,
    Push(S),
    Pop,
}

/// What a matching rule emits.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// The whole match becomes a single token.
    Emit(TokenKind),

    /// One token per capture group, in group order. Groups that did not participate in the
    /// match, or matched an empty string, emit nothing.
    ByGroups(Vec<TokenKind>),
}

/// A single tokenizer rule: a pattern anchored at the cursor, what to emit, and how the state
/// stack changes afterwards.
pub struct Rule<S> {
    regex: Regex,
    action: Action,
    transition: Transition<S>,
    at_line_start: bool,
}

impl<S> Rule<S> {
    /// Creates a rule emitting the whole match as `kind`.
    ///
    /// `pattern` must not carry its own anchors: it is always matched starting exactly at the
    /// cursor. Patterns are compiled as Unicode-aware, multiline, with `.` matching newlines.
    pub fn emit(pattern: &str, kind: TokenKind) -> Rule<S> {
        Rule::new(pattern, Action::Emit(kind))
    }

    /// Creates a rule emitting one token per capture group.
    pub fn by_groups(pattern: &str, kinds: &[TokenKind]) -> Rule<S> {
        Rule::new(pattern, Action::ByGroups(kinds.to_vec()))
    }

    fn new(pattern: &str, action: Action) -> Rule<S> {
        let regex = RegexBuilder::new(&format!(r"\A(?:{})", pattern))
            .dot_matches_new_line(true)
            .multi_line(true)
            .unicode(true)
            .build()
            .unwrap_or_else(|err| panic!("invalid tokenizer rule {:?}: {}", pattern, err));
        Rule {
            regex,
            action,
            transition: Transition::None,
            at_line_start: false,
        }
    }

    /// Enters `state` after this rule matches.
    pub fn push(self, state: S) -> Rule<S> {
        Rule {
            transition: Transition::Push(state),
            ..self
        }
    }

    /// Leaves the current state after this rule matches.
    pub fn pop(self) -> Rule<S> {
        Rule {
            transition: Transition::Pop,
            ..self
        }
    }

    /// Restricts the rule to positions at the beginning of a line.
    pub fn at_line_start(self) -> Rule<S> {
        Rule {
            at_line_start: true,
            ..self
        }
    }
}

pub trait TokenizerRules {
    type State: Copy + Eq + Hash + Debug;

    /// The state every scan starts in, and the bottom of every state stack.
    fn root() -> Self::State;

    /// Rules for every state, ordered by precedence within each state.
    fn rules() -> Vec<(Self::State, Vec<Rule<Self::State>>)>;
}

/// Stack of tokenizer states. The root state is never popped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StateStack<S> {
    root: S,
    frames: Vec<S>,
}

impl<S: Copy + Debug> StateStack<S> {
    pub fn new(root: S) -> StateStack<S> {
        StateStack {
            root,
            frames: Vec::new(),
        }
    }

    pub fn top(&self) -> S {
        self.frames.last().copied().unwrap_or(self.root)
    }

    /// Number of states on the stack, including the root.
    pub fn depth(&self) -> usize {
        self.frames.len() + 1
    }

    pub fn push(&mut self, state: S) {
        self.frames.push(state);
    }

    /// Pops the top state. Returns `false` and leaves the stack at its root if only the root
    /// was left.
    pub fn pop(&mut self) -> bool {
        match self.frames.pop() {
            Some(_) => true,
            None => {
                error!(
                    "tokenizer rule tried to pop the root state {:?}, ignoring",
                    self.root
                );
                false
            }
        }
    }

    pub fn reset(&mut self) {
        self.frames.clear();
    }

    pub fn apply(&mut self, transition: &Transition<S>) {
        match transition {
            Transition::None => {}
            Transition::Push(state) => self.push(*state),
            Transition::Pop => {
                self.pop();
            }
        }
    }
}

/// Regex-based tokenizer driven by a state stack.
///
/// Tokenizers are defined by a list of rules per state represented by `Rules`. At every position
/// only the rules of the state on top of the stack are tried, in declaration order, and the first
/// one matching at the cursor wins, regardless of match length. When no rule matches, the
/// tokenizer still makes progress: a newline is emitted as `Text` and resets the stack to the
/// root state, any other character is emitted as an `Error` token.
///
/// A `Tokenizer` is immutable once built, and every scan owns its stack and cursor, so a single
/// instance can serve any number of scans, including concurrent ones.
pub struct Tokenizer<Rules: TokenizerRules> {
    states: HashMap<Rules::State, Vec<Rule<Rules::State>>>,
    phantom: PhantomData<Rules>,
}

impl<Rules: TokenizerRules> Tokenizer<Rules> {
    pub fn new() -> Self {
        let mut states = HashMap::new();
        for (state, rules) in Rules::rules() {
            debug!("compiled {} rules for state {:?}", rules.len(), state);
            states.insert(state, rules);
        }
        Tokenizer {
            states,
            phantom: PhantomData,
        }
    }

    /// Rules active in `state`, in precedence order.
    pub fn rules_for(&self, state: Rules::State) -> &[Rule<Rules::State>] {
        self.states.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Starts a scan of `text` from the root state.
    pub fn tokens<'a, 't>(&'a self, text: &'t str) -> Tokens<'a, 't, Rules> {
        self.tokens_with_stack(text, StateStack::new(Rules::root()))
    }

    /// Starts a scan of `text` with a caller-supplied state stack, e.g. one saved from a scan of
    /// the preceding chunk.
    pub fn tokens_with_stack<'a, 't>(
        &'a self,
        text: &'t str,
        stack: StateStack<Rules::State>,
    ) -> Tokens<'a, 't, Rules> {
        Tokens {
            tokenizer: self,
            text,
            offset: 0,
            stack,
            pending: VecDeque::new(),
        }
    }
}

impl<Rules: TokenizerRules> Default for Tokenizer<Rules> {
    fn default() -> Self {
        Tokenizer::new()
    }
}

/// Lazy token stream produced by a single scan.
pub struct Tokens<'a, 't, Rules: TokenizerRules> {
    tokenizer: &'a Tokenizer<Rules>,
    text: &'t str,
    offset: usize,
    stack: StateStack<Rules::State>,

    // A rule emitting by groups produces several tokens from a single match.
    pending: VecDeque<Token<'t>>,
}

impl<'a, 't, Rules: TokenizerRules> Tokens<'a, 't, Rules> {
    pub fn stack(&self) -> &StateStack<Rules::State> {
        &self.stack
    }

    /// Consumes the input at the cursor, pushing at least one token to `pending` unless a rule
    /// emitting by groups matched with only empty groups.
    fn advance(&mut self) {
        let tokenizer = self.tokenizer;
        let text = self.text;
        let state = self.stack.top();
        let rest = &text[self.offset..];
        let at_line_start = self.offset == 0 || text.as_bytes()[self.offset - 1] == b'\n';

        for rule in tokenizer.rules_for(state) {
            if rule.at_line_start && !at_line_start {
                continue;
            }

            let length = match &rule.action {
                Action::Emit(kind) => match rule.regex.find(rest) {
                    Some(match_) if !match_.as_str().is_empty() => {
                        self.push_token(*kind, 0, match_.end());
                        match_.end()
                    }
                    _ => continue,
                },
                Action::ByGroups(kinds) => match rule.regex.captures(rest) {
                    Some(captures) => {
                        let end = captures.get(0).map(|whole| whole.end()).unwrap_or(0);
                        if end == 0 {
                            continue;
                        }
                        for (index, kind) in kinds.iter().enumerate() {
                            if let Some(group) = captures.get(index + 1) {
                                if !group.as_str().is_empty() {
                                    self.push_token(*kind, group.start(), group.end());
                                }
                            }
                        }
                        end
                    }
                    None => continue,
                },
            };

            if rule.transition != Transition::None {
                trace!(
                    "{:?} at offset {} in state {:?}",
                    rule.transition,
                    self.offset,
                    state
                );
            }
            self.stack.apply(&rule.transition);
            self.offset += length;
            return;
        }

        let length = rest.chars().next().map(char::len_utf8).unwrap_or(0);
        if rest.starts_with('\n') {
            self.push_token(TokenKind::Text, 0, length);
            self.stack.reset();
        } else {
            debug!(
                "no rule matched at offset {} in state {:?}",
                self.offset, state
            );
            self.push_token(TokenKind::Error, 0, length);
        }
        self.offset += length;
    }

    /// Queues a token covering `start..end` relative to the cursor.
    fn push_token(&mut self, kind: TokenKind, start: usize, end: usize) {
        let span = InputSpan::new(self.offset + start, self.offset + end);
        let text = &self.text[span.range()];
        self.pending.push_back(Token::new(kind, span, text));
    }
}

impl<'a, 't, Rules: TokenizerRules> Iterator for Tokens<'a, 't, Rules> {
    type Item = Token<'t>;

    fn next(&mut self) -> Option<Token<'t>> {
        while self.pending.is_empty() && self.offset < self.text.len() {
            self.advance();
        }
        self.pending.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::{Rule, StateStack, Tokenizer, TokenizerRules, Transition};
    use crate::tokens::kind::TokenKind;

    #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
    enum TestState {
        Root,
        Quoted,
    }

    struct TestRules;

    impl TokenizerRules for TestRules {
        type State = TestState;

        fn root() -> TestState {
            TestState::Root
        }

        fn rules() -> Vec<(TestState, Vec<Rule<TestState>>)> {
            vec![
                (
                    TestState::Root,
                    vec![
                        Rule::emit(r"[ \t]+", TokenKind::Text),
                        Rule::emit(r"#\w+", TokenKind::NameLabel).at_line_start(),
                        Rule::emit(r"if\b", TokenKind::Keyword),
                        Rule::emit(r"[a-z]+", TokenKind::Name),
                        Rule::emit(r"[a-z]+[0-9]+", TokenKind::NameConstant),
                        Rule::by_groups(r"(<)([ \t]*)", &[TokenKind::Operator, TokenKind::Text])
                            .push(TestState::Quoted),
                        Rule::emit(r">", TokenKind::Operator).pop(),
                        Rule::emit(r"\n", TokenKind::Text),
                    ],
                ),
                (
                    TestState::Quoted,
                    vec![Rule::emit(r"[a-z]+", TokenKind::NameEntity).pop()],
                ),
            ]
        }
    }

    fn kinds(text: &str) -> Vec<(TokenKind, String)> {
        Tokenizer::<TestRules>::new()
            .tokens(text)
            .map(|token| (token.kind, token.text.to_string()))
            .collect()
    }

    fn pair(kind: TokenKind, text: &str) -> (TokenKind, String) {
        (kind, text.to_string())
    }

    #[test]
    fn first_match_wins_over_longest() {
        assert_eq!(
            kinds("abc12"),
            vec![
                pair(TokenKind::Name, "abc"),
                pair(TokenKind::Error, "1"),
                pair(TokenKind::Error, "2"),
            ]
        );
    }

    #[test]
    fn keyword_needs_word_boundary() {
        assert_eq!(
            kinds("if ifx"),
            vec![
                pair(TokenKind::Keyword, "if"),
                pair(TokenKind::Text, " "),
                pair(TokenKind::Name, "ifx"),
            ]
        );
    }

    #[test]
    fn groups_and_push_then_pop() {
        assert_eq!(
            kinds("< abc def"),
            vec![
                pair(TokenKind::Operator, "<"),
                pair(TokenKind::Text, " "),
                pair(TokenKind::NameEntity, "abc"),
                pair(TokenKind::Text, " "),
                pair(TokenKind::Name, "def"),
            ]
        );
    }

    #[test]
    fn empty_groups_are_skipped() {
        assert_eq!(
            kinds("<abc"),
            vec![pair(TokenKind::Operator, "<"), pair(TokenKind::NameEntity, "abc")]
        );
    }

    #[test]
    fn error_advance_keeps_state() {
        assert_eq!(
            kinds("<  1abc x"),
            vec![
                pair(TokenKind::Operator, "<"),
                pair(TokenKind::Text, "  "),
                pair(TokenKind::Error, "1"),
                pair(TokenKind::NameEntity, "abc"),
                pair(TokenKind::Text, " "),
                pair(TokenKind::Name, "x"),
            ]
        );
    }

    #[test]
    fn unmatched_newline_resets_to_root() {
        let tokenizer = Tokenizer::<TestRules>::new();
        let mut tokens = tokenizer.tokens("<\nabc");
        assert_eq!(tokens.next().map(|t| t.kind), Some(TokenKind::Operator));
        assert_eq!(tokens.stack().top(), TestState::Quoted);
        let newline = tokens.next().unwrap();
        assert_eq!((newline.kind, newline.text), (TokenKind::Text, "\n"));
        assert_eq!(tokens.stack().top(), TestState::Root);
        assert_eq!(tokens.next().map(|t| t.kind), Some(TokenKind::Name));
        assert_eq!(tokens.next(), None);
    }

    #[test]
    fn pop_at_root_is_clamped() {
        assert_eq!(
            kinds(">>a"),
            vec![
                pair(TokenKind::Operator, ">"),
                pair(TokenKind::Operator, ">"),
                pair(TokenKind::Name, "a"),
            ]
        );

        let mut stack = StateStack::new(TestState::Root);
        assert!(!stack.pop());
        assert_eq!(stack.depth(), 1);
        stack.apply(&Transition::Push(TestState::Quoted));
        assert_eq!(stack.top(), TestState::Quoted);
        assert!(stack.pop());
        assert_eq!(stack.top(), TestState::Root);
    }

    #[test]
    fn line_start_rules_need_line_start() {
        assert_eq!(
            kinds("#a #b\n#c"),
            vec![
                pair(TokenKind::NameLabel, "#a"),
                pair(TokenKind::Text, " "),
                pair(TokenKind::Error, "#"),
                pair(TokenKind::Name, "b"),
                pair(TokenKind::Text, "\n"),
                pair(TokenKind::NameLabel, "#c"),
            ]
        );
    }

    #[test]
    fn spans_are_contiguous_for_multibyte_errors() {
        let text = "é€a";
        let tokens: Vec<_> = Tokenizer::<TestRules>::new().tokens(text).collect();
        assert_eq!(tokens.len(), 3);
        let mut offset = 0;
        for token in &tokens {
            assert_eq!(token.span.start, offset);
            assert_eq!(&text[token.span.range()], token.text);
            offset = token.span.end;
        }
        assert_eq!(offset, text.len());
    }

    #[test]
    fn resumes_from_saved_stack() {
        let tokenizer = Tokenizer::<TestRules>::new();
        let mut first = tokenizer.tokens("<");
        assert!(first.next().is_some());
        assert!(first.next().is_none());
        let stack = first.stack().clone();

        let resumed: Vec<_> = tokenizer
            .tokens_with_stack("abc", stack)
            .map(|token| token.kind)
            .collect();
        assert_eq!(resumed, vec![TokenKind::NameEntity]);
    }
}
