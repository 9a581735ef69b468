/*!

This is the long-form manual for `council_politics` and `councilpoll`.

## Working out a poll

A poll is the contest in one electoral division. Each division returns one or two
councillors; a by-election may fill fewer seats than the division normally returns.

[`Poll::calculate_winner`](crate::Poll::calculate_winner) goes through the candidates in
the order they were added:

1. while a seat is empty, the candidate takes it;
2. otherwise the candidate replaces the holder with the fewest votes, but only with
   strictly more votes than them.

Two consequences are worth knowing:
- an exact tie is decided by the order of the candidates: the one added first keeps
  the seat;
- candidates whose votes have not been counted yet rank below anyone with a count,
  including a count of zero.

Percentages (turnout and each candidate's share) are rounded to one decimal place,
with halves rounded away from zero: 45.65% is shown as 45.7%.

The summary sentence lists the winning parties once each:

| seats | winners              | summary                              |
|-------|----------------------|--------------------------------------|
| 1     | Conservative         | `Conservative win.`                  |
| 2     | Labour, Labour       | `Labour win (two seats).`            |
| 2     | Green, Labour        | `Green/Labour win (one seat each).`  |

## Input formats

`councilpoll` reads election results in two formats, chosen with `--input-type`.

### `json` (default)

One document for a whole election. The optional fields may be left out or set to `-1`.

```json
{
  "electionName": "County Council Elections 2021",
  "electionDate": "2021-05-06",
  "polls": [
    {
      "division": { "name": "Hastings Old Town", "seats": 2 },
      "byElectionSeats": -1,
      "possibleVotes": 12000,
      "actualVotes": 4567,
      "candidates": [
        { "name": "Gill Hart", "party": "Labour", "votes": 2100 },
        { "name": "Ian Jones", "party": "Green", "votes": 1800 }
      ]
    }
  ]
}
```

A candidate with `"votes": -1` has not been counted yet.

### `csv`

One line per candidate, with a header. Lines of the same division are grouped
together, in the order the divisions first appear.

```text
division,candidate,party,votes
Rye & Eastern Rother,Nora Owen,Independent,520
Rye & Eastern Rother,Paul Quinn,Conservative,480
```

The CSV format has no room for seats or the electorate:
- every division returns one councillor unless told otherwise with
  `--division-seats "Hastings Old Town=2"`;
- the votes cast in a division are the sum of the counted votes of its candidates,
  and the turnout is unknown.

## Output

The summary is written as JSON to the file given with `--out`, or to the standard output.

```json
{
  "config": { "election": "County Council Elections 2021", "date": "2021-05-06" },
  "results": [
    {
      "division": "Hastings Old Town",
      "seats": 2,
      "turnout": 38.1,
      "winners": ["Gill Hart", "Kate Lowe"],
      "summary": "Labour win (two seats).",
      "candidates": [
        { "name": "Gill Hart", "party": "Labour", "votes": 2100, "percent": 46.0, "elected": true }
      ]
    }
  ]
}
```

With `--reference`, the summary is compared with an expected summary. Any difference is
printed and the program fails.
*/
