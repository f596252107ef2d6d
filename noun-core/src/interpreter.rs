use crate::compat::{HashMap, Rc, String, ToString, Vec};
use crate::value::{Bail, Noun, RuntimeError};

/// A native gate: takes the whole call frame (gate core) and produces a noun.
pub type NativeFn = fn(&Noun) -> Result<Noun, Bail>;

// Dictionary entry: the native function plus optional help text
#[derive(Clone)]
pub struct DictEntry {
    pub func: NativeFn,
    pub doc: Option<Rc<str>>,
}

// Implement Debug manually to keep function pointers out of the output
impl core::fmt::Debug for DictEntry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DictEntry")
            .field("func", &"<native>")
            .field("doc", &self.doc)
            .finish()
    }
}

pub struct Interpreter {
    pub dictionary: HashMap<Rc<str>, DictEntry>,
    pub atoms: HashMap<String, Rc<str>>,
}

impl Interpreter {
    pub fn new() -> Self {
        let mut interpreter = Self {
            dictionary: HashMap::new(),
            atoms: HashMap::new(),
        };

        crate::builtins::register_builtins(&mut interpreter);

        interpreter
    }

    pub fn intern_atom(&mut self, text: &str) -> Rc<str> {
        if let Some(existing) = self.atoms.get(text) {
            existing.clone()
        } else {
            let atom: Rc<str> = text.into();
            self.atoms.insert(text.to_string(), atom.clone());
            atom
        }
    }

    pub fn define(&mut self, name: &str, func: NativeFn, doc: Option<&str>) {
        let atom = self.intern_atom(name);
        self.dictionary.insert(
            atom,
            DictEntry {
                func,
                doc: doc.map(Rc::<str>::from),
            },
        );
    }

    pub fn lookup(&self, name: &str) -> Option<&DictEntry> {
        self.dictionary.get(name)
    }

    pub fn doc(&self, name: &str) -> Option<&str> {
        self.lookup(name)?.doc.as_deref()
    }

    /// Registered words in alphabetical order.
    pub fn words(&self) -> Vec<Rc<str>> {
        let mut words: Vec<Rc<str>> = self.dictionary.keys().cloned().collect();
        words.sort();
        words
    }

    // Invoke a native gate by name with a prepared call frame.
    // Fatal bails are logged at warn, ordinary failures at debug.
    pub fn call(&self, name: &str, core: &Noun) -> Result<Noun, RuntimeError> {
        let entry = self
            .lookup(name)
            .ok_or_else(|| RuntimeError::UndefinedWord(name.to_string()))?;

        tracing::debug!(word = name, "calling native gate");
        match (entry.func)(core) {
            Ok(product) => Ok(product),
            Err(bail) => {
                if bail.is_fatal() {
                    tracing::warn!(word = name, label = bail.label(), "native gate bailed");
                } else {
                    tracing::debug!(word = name, label = bail.label(), "native gate failed");
                }
                Err(bail.into())
            }
        }
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new()
    }
}
