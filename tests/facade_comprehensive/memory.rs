//! In-process command interpreter used as the store in facade tests.
//!
//! Understands exactly the commands the facade issues, with Redis reply
//! shapes (RESP2). Every key argument is recorded so tests can check what
//! reached the store boundary. Failures can be injected per command name.

use nsredis::{CommandExecutor, ExecFuture};
use parking_lot::Mutex;
use redis::{Arg, Cmd, ErrorKind, RedisError, RedisResult, Value};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::time::{Duration, Instant};

type Bytes = Vec<u8>;

enum Entry {
    Str(Bytes),
    Set(BTreeSet<Bytes>),
    Hash(BTreeMap<Bytes, Bytes>),
    ZSet(Vec<(Bytes, f64)>),
    Bloom(HashSet<Bytes>),
}

struct Slot {
    entry: Entry,
    expires_at: Option<Instant>,
}

#[derive(Default)]
struct State {
    data: HashMap<Bytes, Slot>,
    seen_keys: Vec<String>,
    commands: Vec<String>,
    failing: HashSet<String>,
    offline: bool,
}

/// Store double implementing [`CommandExecutor`].
#[derive(Default)]
pub struct MemoryExecutor {
    state: Mutex<State>,
}

fn wrong_type() -> RedisError {
    RedisError::from((
        ErrorKind::ResponseError,
        "WRONGTYPE Operation against a key holding the wrong kind of value",
    ))
}

fn not_integer() -> RedisError {
    RedisError::from((ErrorKind::ResponseError, "ERR value is not an integer or out of range"))
}

fn syntax() -> RedisError {
    RedisError::from((ErrorKind::ResponseError, "ERR syntax error"))
}

fn bulk(bytes: &[u8]) -> Value {
    Value::BulkString(bytes.to_vec())
}

fn int(n: i64) -> Value {
    Value::Int(n)
}

fn flag(b: bool) -> Value {
    Value::Int(if b { 1 } else { 0 })
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn parse_i64(bytes: &[u8]) -> RedisResult<i64> {
    text(bytes).parse::<i64>().map_err(|_| not_integer())
}

fn parse_f64(bytes: &[u8]) -> RedisResult<f64> {
    text(bytes)
        .parse::<f64>()
        .map_err(|_| RedisError::from((ErrorKind::ResponseError, "ERR value is not a valid float")))
}

impl MemoryExecutor {
    /// Empty, reachable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store that refuses every command, PING included.
    pub fn offline() -> Self {
        let exec = Self::default();
        exec.state.lock().offline = true;
        exec
    }

    /// Make every future `name` command fail with an I/O error.
    pub fn fail_command(&self, name: &str) {
        self.state.lock().failing.insert(name.to_uppercase());
    }

    /// Key arguments observed so far, in order.
    pub fn seen_keys(&self) -> Vec<String> {
        self.state.lock().seen_keys.clone()
    }

    /// Command names observed so far, in order.
    pub fn commands(&self) -> Vec<String> {
        self.state.lock().commands.clone()
    }

    /// Whether `full_key` currently holds a value.
    pub fn contains(&self, full_key: &str) -> bool {
        let mut state = self.state.lock();
        state.purge(full_key.as_bytes());
        state.data.contains_key(full_key.as_bytes())
    }

    /// Raw string stored under `full_key`, bypassing the facade.
    pub fn raw_string(&self, full_key: &str) -> Option<String> {
        let mut state = self.state.lock();
        state.purge(full_key.as_bytes());
        match state.data.get(full_key.as_bytes()) {
            Some(Slot {
                entry: Entry::Str(bytes),
                ..
            }) => Some(text(bytes)),
            _ => None,
        }
    }

    /// Whether `full_key` has an expiry set.
    pub fn has_expiry(&self, full_key: &str) -> bool {
        let state = self.state.lock();
        state
            .data
            .get(full_key.as_bytes())
            .map(|slot| slot.expires_at.is_some())
            .unwrap_or(false)
    }

    fn apply(&self, cmd: &Cmd) -> RedisResult<Value> {
        let args: Vec<Bytes> = cmd
            .args_iter()
            .filter_map(|arg| match arg {
                Arg::Simple(bytes) => Some(bytes.to_vec()),
                Arg::Cursor => None,
            })
            .collect();
        let name = text(&args[0]).to_uppercase();

        let mut state = self.state.lock();
        if state.offline {
            return Err(RedisError::from((ErrorKind::IoError, "connection refused")));
        }
        state.commands.push(name.clone());
        if let Some(key) = args.get(1) {
            state.seen_keys.push(text(key));
            state.purge(key);
        }
        if state.failing.contains(&name) {
            return Err(RedisError::from((ErrorKind::IoError, "injected failure")));
        }

        state.dispatch(&name, &args)
    }
}

impl CommandExecutor for MemoryExecutor {
    fn execute<'a>(&'a self, cmd: &'a Cmd) -> ExecFuture<'a> {
        let reply = self.apply(cmd);
        Box::pin(async move { reply })
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

impl State {
    fn purge(&mut self, key: &[u8]) {
        let expired = matches!(
            self.data.get(key),
            Some(Slot { expires_at: Some(at), .. }) if *at <= Instant::now()
        );
        if expired {
            self.data.remove(key);
        }
    }

    fn slot_mut(&mut self, key: &[u8], create: impl FnOnce() -> Entry) -> &mut Slot {
        self.data.entry(key.to_vec()).or_insert_with(|| Slot {
            entry: create(),
            expires_at: None,
        })
    }

    fn dispatch(&mut self, name: &str, args: &[Bytes]) -> RedisResult<Value> {
        let key = args.get(1).map(|k| k.as_slice()).unwrap_or_default();
        match name {
            "PING" => Ok(Value::SimpleString("PONG".into())),

            // ----- strings -----
            "GET" => match self.data.get(key) {
                None => Ok(Value::Nil),
                Some(Slot { entry: Entry::Str(v), .. }) => Ok(bulk(v)),
                Some(_) => Err(wrong_type()),
            },
            "SET" => {
                let mut nx = false;
                let mut ttl = None;
                let mut i = 3;
                while i < args.len() {
                    match text(&args[i]).to_uppercase().as_str() {
                        "NX" => nx = true,
                        "EX" => {
                            i += 1;
                            let secs = parse_i64(args.get(i).ok_or_else(syntax)?)?;
                            ttl = Some(Duration::from_secs(secs as u64));
                        }
                        "PX" => {
                            i += 1;
                            let ms = parse_i64(args.get(i).ok_or_else(syntax)?)?;
                            ttl = Some(Duration::from_millis(ms as u64));
                        }
                        _ => return Err(syntax()),
                    }
                    i += 1;
                }
                if nx && self.data.contains_key(key) {
                    return Ok(Value::Nil);
                }
                self.data.insert(
                    key.to_vec(),
                    Slot {
                        entry: Entry::Str(args[2].clone()),
                        expires_at: ttl.map(|d| Instant::now() + d),
                    },
                );
                Ok(Value::Okay)
            }
            "INCR" | "DECR" => {
                let delta = if name == "INCR" { 1 } else { -1 };
                let slot = self.slot_mut(key, || Entry::Str(b"0".to_vec()));
                match &mut slot.entry {
                    Entry::Str(v) => {
                        let next = parse_i64(v)? + delta;
                        *v = next.to_string().into_bytes();
                        Ok(int(next))
                    }
                    _ => Err(wrong_type()),
                }
            }

            // ----- keys -----
            "DEL" => Ok(flag(self.data.remove(key).is_some())),
            "EXPIRE" | "PEXPIRE" => {
                let amount = parse_i64(&args[2])?;
                let ttl = if name == "EXPIRE" {
                    Duration::from_secs(amount.max(0) as u64)
                } else {
                    Duration::from_millis(amount.max(0) as u64)
                };
                match self.data.get_mut(key) {
                    Some(slot) => {
                        slot.expires_at = Some(Instant::now() + ttl);
                        Ok(int(1))
                    }
                    None => Ok(int(0)),
                }
            }
            "TTL" => match self.data.get(key) {
                None => Ok(int(-2)),
                Some(Slot { expires_at: None, .. }) => Ok(int(-1)),
                Some(Slot { expires_at: Some(at), .. }) => {
                    let left = at.saturating_duration_since(Instant::now());
                    Ok(int(((left.as_millis() + 500) / 1000) as i64))
                }
            },

            // ----- sets -----
            "SADD" => {
                let slot = self.slot_mut(key, || Entry::Set(BTreeSet::new()));
                match &mut slot.entry {
                    Entry::Set(set) => {
                        let added = args[2..].iter().filter(|m| set.insert((*m).clone())).count();
                        Ok(int(added as i64))
                    }
                    _ => Err(wrong_type()),
                }
            }
            "SREM" => {
                let (removed, now_empty) = match self.data.get_mut(key) {
                    None => return Ok(int(0)),
                    Some(Slot { entry: Entry::Set(set), .. }) => {
                        let removed = args[2..].iter().filter(|m| set.remove(*m)).count();
                        (removed, set.is_empty())
                    }
                    Some(_) => return Err(wrong_type()),
                };
                if now_empty {
                    self.data.remove(key);
                }
                Ok(int(removed as i64))
            }
            "SISMEMBER" => match self.data.get(key) {
                None => Ok(flag(false)),
                Some(Slot { entry: Entry::Set(set), .. }) => Ok(flag(set.contains(&args[2]))),
                Some(_) => Err(wrong_type()),
            },
            "SMEMBERS" => match self.data.get(key) {
                None => Ok(Value::Array(vec![])),
                Some(Slot { entry: Entry::Set(set), .. }) => {
                    Ok(Value::Array(set.iter().map(|m| bulk(m)).collect()))
                }
                Some(_) => Err(wrong_type()),
            },
            "SCARD" => match self.data.get(key) {
                None => Ok(int(0)),
                Some(Slot { entry: Entry::Set(set), .. }) => Ok(int(set.len() as i64)),
                Some(_) => Err(wrong_type()),
            },

            // ----- hashes -----
            "HGET" => match self.data.get(key) {
                None => Ok(Value::Nil),
                Some(Slot { entry: Entry::Hash(h), .. }) => {
                    Ok(h.get(&args[2]).map(|v| bulk(v)).unwrap_or(Value::Nil))
                }
                Some(_) => Err(wrong_type()),
            },
            "HSET" | "HSETNX" => {
                let only_new = name == "HSETNX";
                let slot = self.slot_mut(key, || Entry::Hash(BTreeMap::new()));
                match &mut slot.entry {
                    Entry::Hash(h) => {
                        let exists = h.contains_key(&args[2]);
                        if !(only_new && exists) {
                            h.insert(args[2].clone(), args[3].clone());
                        }
                        Ok(flag(!exists))
                    }
                    _ => Err(wrong_type()),
                }
            }
            "HDEL" => {
                let (removed, now_empty) = match self.data.get_mut(key) {
                    None => return Ok(int(0)),
                    Some(Slot { entry: Entry::Hash(h), .. }) => {
                        let removed = args[2..].iter().filter(|f| h.remove(*f).is_some()).count();
                        (removed, h.is_empty())
                    }
                    Some(_) => return Err(wrong_type()),
                };
                if now_empty {
                    self.data.remove(key);
                }
                Ok(int(removed as i64))
            }
            "HKEYS" => match self.data.get(key) {
                None => Ok(Value::Array(vec![])),
                Some(Slot { entry: Entry::Hash(h), .. }) => {
                    Ok(Value::Array(h.keys().map(|f| bulk(f)).collect()))
                }
                Some(_) => Err(wrong_type()),
            },
            "HEXISTS" => match self.data.get(key) {
                None => Ok(flag(false)),
                Some(Slot { entry: Entry::Hash(h), .. }) => Ok(flag(h.contains_key(&args[2]))),
                Some(_) => Err(wrong_type()),
            },
            "HLEN" => match self.data.get(key) {
                None => Ok(int(0)),
                Some(Slot { entry: Entry::Hash(h), .. }) => Ok(int(h.len() as i64)),
                Some(_) => Err(wrong_type()),
            },
            "HINCRBY" => {
                let delta = parse_i64(&args[3])?;
                let slot = self.slot_mut(key, || Entry::Hash(BTreeMap::new()));
                match &mut slot.entry {
                    Entry::Hash(h) => {
                        let current = match h.get(&args[2]) {
                            Some(v) => parse_i64(v)?,
                            None => 0,
                        };
                        let next = current + delta;
                        h.insert(args[2].clone(), next.to_string().into_bytes());
                        Ok(int(next))
                    }
                    _ => Err(wrong_type()),
                }
            }
            "HGETALL" => match self.data.get(key) {
                None => Ok(Value::Array(vec![])),
                Some(Slot { entry: Entry::Hash(h), .. }) => Ok(Value::Array(
                    h.iter().flat_map(|(f, v)| [bulk(f), bulk(v)]).collect(),
                )),
                Some(_) => Err(wrong_type()),
            },

            // ----- sorted sets -----
            "ZADD" => {
                let score = parse_f64(&args[2])?;
                let member = args[3].clone();
                let slot = self.slot_mut(key, || Entry::ZSet(Vec::new()));
                match &mut slot.entry {
                    Entry::ZSet(z) => match z.iter_mut().find(|(m, _)| *m == member) {
                        Some(existing) => {
                            existing.1 = score;
                            Ok(int(0))
                        }
                        None => {
                            z.push((member, score));
                            Ok(int(1))
                        }
                    },
                    _ => Err(wrong_type()),
                }
            }
            "ZRANGE" => {
                let start = parse_i64(&args[2])?;
                let stop = parse_i64(&args[3])?;
                let with_scores = args
                    .get(4)
                    .map(|a| text(a).eq_ignore_ascii_case("WITHSCORES"))
                    .unwrap_or(false);
                let mut members = match self.data.get(key) {
                    None => return Ok(Value::Array(vec![])),
                    Some(Slot { entry: Entry::ZSet(z), .. }) => z.clone(),
                    Some(_) => return Err(wrong_type()),
                };
                members.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

                let len = members.len() as i64;
                let start = if start < 0 { (len + start).max(0) } else { start };
                let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
                if start > stop || start >= len {
                    return Ok(Value::Array(vec![]));
                }
                let mut out = Vec::new();
                for (member, score) in &members[start as usize..=stop as usize] {
                    out.push(bulk(member));
                    if with_scores {
                        out.push(bulk(score.to_string().as_bytes()));
                    }
                }
                Ok(Value::Array(out))
            }

            // ----- bloom filters (exact sets stand in for the filter) -----
            "BF.RESERVE" => {
                if self.data.contains_key(key) {
                    return Err(RedisError::from((ErrorKind::ResponseError, "ERR item exists")));
                }
                self.slot_mut(key, || Entry::Bloom(HashSet::new()));
                Ok(Value::Okay)
            }
            "BF.ADD" | "BF.MADD" => {
                let slot = self.slot_mut(key, || Entry::Bloom(HashSet::new()));
                match &mut slot.entry {
                    Entry::Bloom(filter) => {
                        let flags: Vec<Value> =
                            args[2..].iter().map(|m| flag(filter.insert(m.clone()))).collect();
                        if name == "BF.ADD" {
                            Ok(flags.into_iter().next().unwrap_or(Value::Nil))
                        } else {
                            Ok(Value::Array(flags))
                        }
                    }
                    _ => Err(wrong_type()),
                }
            }
            "BF.EXISTS" | "BF.MEXISTS" => {
                let flags: Vec<Value> = match self.data.get(key) {
                    None => args[2..].iter().map(|_| flag(false)).collect(),
                    Some(Slot { entry: Entry::Bloom(filter), .. }) => {
                        args[2..].iter().map(|m| flag(filter.contains(m))).collect()
                    }
                    Some(_) => return Err(wrong_type()),
                };
                if name == "BF.EXISTS" {
                    Ok(flags.into_iter().next().unwrap_or(Value::Nil))
                } else {
                    Ok(Value::Array(flags))
                }
            }

            other => Err(RedisError::from((
                ErrorKind::ResponseError,
                "ERR unknown command",
                other.to_string(),
            ))),
        }
    }
}
